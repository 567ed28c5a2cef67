/*!
Processing parameters: a name→value map with per-parameter
mutability, the `infoset`/`canonical-form` composite projections, and the
`CharacterDatabase` host-collaborator contract for NFC/combining-class
queries that this crate deliberately does not implement itself.
*/

use crate::error::ErrorHandler;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Debug;
use std::rc::Rc;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

///
/// A boolean or string-valued processing parameter. `setParameter`/
/// `getParameter` on the DOM configuration traffic in `DOMString`/`boolean`/
/// object-typed values; this crate only needs booleans, strings, and the
/// `resource-resolver`/`error-handler` object slots, represented directly as
/// Rust values rather than a boxed `Any`.
///
#[derive(Clone, Debug)]
pub enum ParamValue {
    Bool(bool),
    Str(Option<String>),
}

impl ParamValue {
    pub fn as_bool(&self) -> bool {
        match self {
            ParamValue::Bool(b) => *b,
            ParamValue::Str(_) => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => s.as_deref(),
            ParamValue::Bool(_) => None,
        }
    }
}

/// A host collaborator providing Unicode NFC and combining-class queries.
/// `check-character-normalization` and `normalize-characters` are mutable
/// only while a `CharacterDatabase` is registered; with none registered
/// those parameters stay pinned at their immutable default of `false`.
pub trait CharacterDatabase: Debug {
    fn is_nfc(&self, s: &str) -> bool;
    fn starts_with_combining_char(&self, s: &str) -> bool;
}

const MUTABLE: bool = true;
const IMMUTABLE: bool = false;

macro_rules! bool_param {
    ($default:expr) => {
        (ParamValue::Bool($default), MUTABLE)
    };
    ($default:expr, $mutable:expr) => {
        (ParamValue::Bool($default), $mutable)
    };
}

///
/// The fixed parameter catalogue, plus the `infoset`/`canonical-form`
/// composites and the `error-handler`/`resource-resolver`/`character-database`
/// object slots that don't fit the name→bool/string map.
///
#[derive(Clone, Debug)]
pub struct Configuration {
    params: HashMap<&'static str, (ParamValue, bool)>,
    error_handler: Option<Rc<RefCell<dyn ErrorHandler>>>,
    character_database: Option<Rc<dyn CharacterDatabase>>,
}

impl Default for Configuration {
    fn default() -> Self {
        let mut params = HashMap::new();
        params.insert("canonical-form", bool_param!(false));
        params.insert("cdata-sections", bool_param!(true));
        params.insert("check-character-normalization", bool_param!(false, IMMUTABLE));
        params.insert("comments", bool_param!(true));
        params.insert("datatype-normalization", bool_param!(false, IMMUTABLE));
        params.insert("element-content-whitespace", bool_param!(true));
        params.insert("entities", bool_param!(true));
        params.insert(
            "ignore-unknown-character-denormalizations",
            bool_param!(true, IMMUTABLE),
        );
        params.insert("namespaces", bool_param!(true));
        params.insert("namespace-declarations", bool_param!(true));
        params.insert("normalize-characters", bool_param!(false, IMMUTABLE));
        params.insert(
            "schema-location",
            (ParamValue::Str(None), IMMUTABLE),
        );
        params.insert("schema-type", (ParamValue::Str(None), IMMUTABLE));
        params.insert("split-cdata-sections", bool_param!(true));
        params.insert("validate", bool_param!(false, IMMUTABLE));
        params.insert("validate-if-schema", bool_param!(false, IMMUTABLE));
        params.insert("well-formed", bool_param!(true));
        params.insert("charset-overrides-xml-encoding", bool_param!(true));
        params.insert("disallow-doctype", bool_param!(false));
        params.insert("supported-media-types-only", bool_param!(false));
        params.insert("discard-default-content", bool_param!(true));
        params.insert("format-pretty-print", bool_param!(false));
        params.insert("xml-declaration", bool_param!(true));
        params.insert("pxdom-assume-element-content", bool_param!(false));
        params.insert("pxdom-resolve-resources", bool_param!(false, IMMUTABLE));
        Self {
            params,
            error_handler: None,
            character_database: None,
        }
    }
}

impl Configuration {
    pub fn register_character_database(&mut self, db: Rc<dyn CharacterDatabase>) {
        self.character_database = Some(db);
        self.set_mutability("check-character-normalization", MUTABLE);
        self.set_mutability("normalize-characters", MUTABLE);
    }

    pub fn character_database(&self) -> Option<&Rc<dyn CharacterDatabase>> {
        self.character_database.as_ref()
    }

    pub fn error_handler(&self) -> Option<Rc<RefCell<dyn ErrorHandler>>> {
        self.error_handler.clone()
    }

    pub fn set_error_handler(&mut self, handler: Option<Rc<RefCell<dyn ErrorHandler>>>) {
        self.error_handler = handler;
    }

    fn set_mutability(&mut self, name: &'static str, mutable: bool) {
        if let Some(entry) = self.params.get_mut(name) {
            entry.1 = mutable;
        }
    }

    /// `canSetParameter`: whether `value` may be written to `name` without
    /// raising. A value equal to the current default is always permitted,
    /// regardless of mutability.
    pub fn can_set_parameter(&self, name: &str, value: &ParamValue) -> bool {
        if name == "infoset" || name == "canonical-form" {
            return true;
        }
        match self.params.get(name) {
            None => false,
            Some((_, mutable)) => {
                *mutable || self.get_parameter(name).map(|d| values_eq(&d, value)) == Some(true)
            }
        }
    }

    /// `setParameter`. Returns `false` (the caller should raise
    /// `NOT_SUPPORTED_ERR`) if the name is unknown or immutable-and-changed.
    pub fn set_parameter(&mut self, name: &str, value: ParamValue) -> bool {
        match name {
            "infoset" => {
                if value.as_bool() {
                    self.apply_infoset();
                }
                return true;
            }
            "canonical-form" => {
                if value.as_bool() {
                    self.apply_canonical_form();
                }
                return true;
            }
            _ => {}
        }
        if !self.can_set_parameter(name, &value) {
            return false;
        }
        if let Some(entry) = self.params.get_mut(name) {
            entry.0 = value;
            true
        } else {
            false
        }
    }

    pub fn get_parameter(&self, name: &str) -> Option<ParamValue> {
        match name {
            "infoset" => Some(ParamValue::Bool(self.is_infoset())),
            "canonical-form" => Some(ParamValue::Bool(self.is_canonical_form())),
            _ => self.params.get(name).map(|(v, _)| v.clone()),
        }
    }

    pub fn get_bool(&self, name: &str) -> bool {
        self.get_parameter(name).map(|v| v.as_bool()).unwrap_or(false)
    }

    fn force_bool(&mut self, name: &'static str, value: bool) {
        if let Some(entry) = self.params.get_mut(name) {
            entry.0 = ParamValue::Bool(value);
        }
    }

    fn apply_infoset(&mut self) {
        self.force_bool("cdata-sections", false);
        self.force_bool("datatype-normalization", false);
        self.force_bool("entities", false);
        self.force_bool("validate-if-schema", false);
        self.force_bool("comments", true);
        self.force_bool("element-content-whitespace", true);
        self.force_bool("namespace-declarations", true);
        self.force_bool("namespaces", true);
        self.force_bool("well-formed", true);
    }

    fn is_infoset(&self) -> bool {
        !self.get_bool("cdata-sections")
            && !self.get_bool("datatype-normalization")
            && !self.get_bool("entities")
            && !self.get_bool("validate-if-schema")
            && self.get_bool("comments")
            && self.get_bool("element-content-whitespace")
            && self.get_bool("namespace-declarations")
            && self.get_bool("namespaces")
            && self.get_bool("well-formed")
    }

    fn apply_canonical_form(&mut self) {
        self.force_bool("cdata-sections", false);
        self.force_bool("entities", false);
        self.force_bool("normalize-characters", false);
        self.force_bool("discard-default-content", false);
        self.force_bool("xml-declaration", false);
        self.force_bool("element-content-whitespace", true);
        self.force_bool("namespace-declarations", true);
        self.force_bool("namespaces", true);
        self.force_bool("well-formed", true);
    }

    fn is_canonical_form(&self) -> bool {
        !self.get_bool("cdata-sections")
            && !self.get_bool("entities")
            && !self.get_bool("normalize-characters")
            && !self.get_bool("discard-default-content")
            && !self.get_bool("xml-declaration")
            && self.get_bool("element-content-whitespace")
            && self.get_bool("namespace-declarations")
            && self.get_bool("namespaces")
            && self.get_bool("well-formed")
    }
}

fn values_eq(a: &ParamValue, b: &ParamValue) -> bool {
    match (a, b) {
        (ParamValue::Bool(x), ParamValue::Bool(y)) => x == y,
        (ParamValue::Str(x), ParamValue::Str(y)) => x == y,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn immutable_param_rejects_change() {
        let mut cfg = Configuration::default();
        assert!(!cfg.set_parameter("validate", ParamValue::Bool(true)));
        assert!(cfg.set_parameter("validate", ParamValue::Bool(false)));
    }

    #[test]
    fn infoset_projects_component_parameters() {
        let mut cfg = Configuration::default();
        cfg.set_parameter("infoset", ParamValue::Bool(true));
        assert!(!cfg.get_bool("cdata-sections"));
        assert!(!cfg.get_bool("entities"));
        assert!(cfg.get_bool("namespaces"));
        assert!(cfg.get_parameter("infoset").unwrap().as_bool());
    }

    #[test]
    fn canonical_form_reads_back_true_only_when_all_components_match() {
        let mut cfg = Configuration::default();
        cfg.set_parameter("canonical-form", ParamValue::Bool(true));
        assert!(cfg.get_parameter("canonical-form").unwrap().as_bool());
        cfg.set_parameter("cdata-sections", ParamValue::Bool(true));
        assert!(!cfg.get_parameter("canonical-form").unwrap().as_bool());
    }

    #[test]
    fn character_normalization_immutable_without_database() {
        let cfg = Configuration::default();
        assert!(!cfg.can_set_parameter(
            "check-character-normalization",
            &ParamValue::Bool(true)
        ));
    }
}
