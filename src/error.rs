/*!
Error taxonomies for the DOM core.

Two axes, per the DOM Level 3 Core / Load-Save recommendations: synchronous
structural violations raise a typed [`Error`] visible to the caller; processing-time
issues raise a [`DOMError`] routed through a configured [`ErrorHandler`].
*/

use std::cell::RefCell;
use std::fmt::{Display, Formatter};
use std::rc::Rc;
use thiserror::Error;

use crate::node::RefNode;

// ------------------------------------------------------------------------------------------------
// Public Types -- exception taxonomy
// ------------------------------------------------------------------------------------------------

///
/// The DOM exception taxonomy. Raised synchronously from the public node
/// and tree-algorithm API on structural violations.
///
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    #[error("A CharacterData offset or count was out of range")]
    IndexSize,

    #[error("The child kind is not permitted here, the insertion would be cyclic, or a second root/doctype was attempted")]
    HierarchyRequest,

    #[error("Cross-document insertion attempted without adoption")]
    WrongDocument,

    #[error("A name string violates the XML Name production")]
    InvalidCharacter,

    #[error("Mutation attempted on a readonly node")]
    NoModificationAllowed,

    #[error("A qualified-name/namespace pairing violates the Namespaces rules")]
    Namespace,

    #[error("The removal target is absent from its parent or map")]
    NotFound,

    #[error("The operation is not supported: {reason}")]
    NotSupported { reason: String },

    #[error("The Attr is already owned by another Element")]
    InUseAttribute,
}

pub type DOMResult<T> = Result<T, Error>;

pub fn not_supported<S>(reason: S) -> Error
where
    S: Into<String>,
{
    Error::NotSupported {
        reason: reason.into(),
    }
}

// ------------------------------------------------------------------------------------------------
// Public Types -- DOMError processing taxonomy
// ------------------------------------------------------------------------------------------------

///
/// Severity of a [`DOMError`]. A fatal error always aborts the operation that
/// raised it regardless of what the handler returns.
///
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Severity {
    Warning,
    Error,
    Fatal,
}

///
/// The `type` tag of a [`DOMError`]. Each variant carries its default
/// severity and its default continuation when no handler is installed or the
/// handler returns no opinion.
///
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DOMErrorKind {
    PxdomParseError,
    UnsupportedEncoding,
    NoInputSpecified,
    NoOutputSpecified,
    UnsupportedMediaType,
    DoctypeNotAllowed,
    WfInvalidCharacter,
    WfInvalidCharacterSerialize,
    WfInvalidCharacterInNodeName,
    CdataSectionSplitted,
    UnboundNamespaceInEntity,
    XmlDeclarationNeeded,
    CheckCharacterNormalizationFailure,
    PxdomUriUnreadable,
}

impl DOMErrorKind {
    /// The type-string advertised on the wire.
    pub fn type_name(&self) -> &'static str {
        match self {
            DOMErrorKind::PxdomParseError => "pxdom-parse-error",
            DOMErrorKind::UnsupportedEncoding => "unsupported-encoding",
            DOMErrorKind::NoInputSpecified => "no-input-specified",
            DOMErrorKind::NoOutputSpecified => "no-output-specified",
            DOMErrorKind::UnsupportedMediaType => "unsupported-media-type",
            DOMErrorKind::DoctypeNotAllowed => "doctype-not-allowed",
            DOMErrorKind::WfInvalidCharacter => "wf-invalid-character",
            DOMErrorKind::WfInvalidCharacterSerialize => "wf-invalid-character",
            DOMErrorKind::WfInvalidCharacterInNodeName => "wf-invalid-character-in-node-name",
            DOMErrorKind::CdataSectionSplitted => "cdata-section-splitted",
            DOMErrorKind::UnboundNamespaceInEntity => "unbound-namespace-in-entity",
            DOMErrorKind::XmlDeclarationNeeded => "xml-declaration-needed",
            DOMErrorKind::CheckCharacterNormalizationFailure => {
                "check-character-normalization-failure"
            }
            DOMErrorKind::PxdomUriUnreadable => "pxdom-uri-unreadable",
        }
    }

    pub fn default_severity(&self) -> Severity {
        match self {
            DOMErrorKind::PxdomParseError
            | DOMErrorKind::UnsupportedEncoding
            | DOMErrorKind::NoInputSpecified
            | DOMErrorKind::NoOutputSpecified
            | DOMErrorKind::UnsupportedMediaType
            | DOMErrorKind::DoctypeNotAllowed
            | DOMErrorKind::WfInvalidCharacterSerialize
            | DOMErrorKind::WfInvalidCharacterInNodeName
            | DOMErrorKind::PxdomUriUnreadable => Severity::Fatal,
            DOMErrorKind::WfInvalidCharacter
            | DOMErrorKind::CheckCharacterNormalizationFailure => Severity::Error,
            DOMErrorKind::CdataSectionSplitted
            | DOMErrorKind::UnboundNamespaceInEntity
            | DOMErrorKind::XmlDeclarationNeeded => Severity::Warning,
        }
    }

    /// Whether the default (no handler installed) continuation is to keep
    /// going (`true`) rather than abort (`false`).
    pub fn default_continue(&self) -> bool {
        matches!(self.default_severity(), Severity::Warning)
    }
}

///
/// A single processing-time error or warning, as routed through an
/// [`ErrorHandler`]. Mirrors the DOM `DOMError` interface: severity, message,
/// type tag, the related node (if any), and a source location.
///
#[derive(Clone, Debug)]
pub struct DOMError {
    pub severity: Severity,
    pub message: String,
    pub kind: DOMErrorKind,
    pub related_node: Option<RefNode>,
    pub location: Option<Location>,
}

impl DOMError {
    pub fn new<S: Into<String>>(kind: DOMErrorKind, message: S) -> Self {
        Self {
            severity: kind.default_severity(),
            message: message.into(),
            kind,
            related_node: None,
            location: None,
        }
    }

    pub fn with_node(mut self, node: RefNode) -> Self {
        self.related_node = Some(node);
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

impl Display for DOMError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}:{}] {}",
            self.severity,
            self.kind.type_name(),
            self.message
        )
    }
}

impl std::error::Error for DOMError {}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Severity::Warning => "warning",
                Severity::Error => "error",
                Severity::Fatal => "fatal",
            }
        )
    }
}

///
/// Row/column location, recorded on nodes at parse time and carried by
/// `DOMError` so a handler can report where the problem occurred.
///
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Location {
    pub row: u64,
    pub column: u64,
}

// ------------------------------------------------------------------------------------------------
// Error handler contract
// ------------------------------------------------------------------------------------------------

///
/// A configured callback consulted by the parser, serializer, and tree
/// algorithms whenever a [`DOMError`] is raised. Returning `true` continues
/// processing, `false` aborts; for `Fatal` severities the abort is
/// unconditional regardless of the return value.
///
pub trait ErrorHandler: std::fmt::Debug {
    fn handle_error(&self, error: &DOMError) -> bool;
}

/// The handler behavior when no `ErrorHandler` has been configured: continue
/// on warnings, abort on error/fatal.
#[derive(Debug, Default)]
pub struct DefaultErrorHandler;

impl ErrorHandler for DefaultErrorHandler {
    fn handle_error(&self, error: &DOMError) -> bool {
        error.kind.default_continue()
    }
}

/// Dispatches a `DOMError` to an optional handler and resolves the
/// fatal-is-unconditional / handler-overrides-default rule into a
/// single `bool`: `true` means continue, `false` means abort.
pub fn dispatch_error(
    handler: &Option<Rc<RefCell<dyn ErrorHandler>>>,
    error: DOMError,
) -> bool {
    if error.severity == Severity::Fatal {
        error!("{}", error);
        if let Some(h) = handler {
            h.borrow().handle_error(&error);
        }
        return false;
    }
    let continue_ = match handler {
        Some(h) => h.borrow().handle_error(&error),
        None => error.kind.default_continue(),
    };
    if continue_ {
        match error.severity {
            Severity::Warning => warn!("{}", error),
            _ => debug!("{} (continuing)", error),
        }
    } else {
        error!("{}", error);
    }
    continue_
}

/// A halt propagated out of a parser or serializer filter's `INTERRUPT`
/// response, or out of an aborted `DOMError` dispatch. Carries
/// whatever partial result had already been produced.
#[derive(Debug)]
pub enum Halt<T> {
    Interrupted(T),
    Aborted(DOMError),
}
