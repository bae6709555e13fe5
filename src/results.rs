use serde::{Deserialize, Serialize};

/// One documented class or interface, reconstructed from a mirrored page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiObjectInfo {
    /// Dot-joined java package name, e.g. "android.view"
    pub package_name: String,

    /// Bare type name, e.g. "View"
    pub type_name: String,

    /// Whether the page documents an interface rather than a class
    pub is_interface: bool,

    /// Methods and constructors in document order
    pub methods: Vec<ApiMethodInfo>,
}

impl ApiObjectInfo {
    pub fn new(package_name: String, type_name: String, is_interface: bool) -> Self {
        Self {
            package_name,
            type_name,
            is_interface,
            methods: Vec::new(),
        }
    }
}

/// One method or constructor with its reconciled parameter list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMethodInfo {
    pub name: String,

    /// Parameters in declaration order
    pub parameters: Vec<ApiParameterInfo>,
}

impl ApiMethodInfo {
    pub fn new(name: String) -> Self {
        Self {
            name,
            parameters: Vec::new(),
        }
    }

    /// A method is a constructor when its name equals the enclosing type name
    /// (ordinal comparison)
    pub fn is_constructor_of(&self, type_name: &str) -> bool {
        self.name == type_name
    }
}

/// One parameter: type recovered from the method anchor fragment,
/// name recovered from the inline declaration text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiParameterInfo {
    pub name: String,

    /// Package of the parameter type; empty for primitives and other
    /// unqualified types
    pub package_name: String,

    pub type_name: String,
}

impl ApiParameterInfo {
    /// Split a fully qualified type string at its last '.' into package and
    /// bare type name. "java.lang.String" -> ("java.lang", "String"),
    /// "int" -> ("", "int").
    pub fn from_qualified_type(name: String, qualified_type: &str) -> Self {
        let (package_name, type_name) = match qualified_type.rfind('.') {
            Some(idx) => (
                qualified_type[..idx].to_string(),
                qualified_type[idx + 1..].to_string(),
            ),
            None => (String::new(), qualified_type.to_string()),
        };
        Self {
            name,
            package_name,
            type_name,
        }
    }

    /// The fully qualified type string, package-prefixed when one is present
    pub fn qualified_type(&self) -> String {
        if self.package_name.is_empty() {
            self.type_name.clone()
        } else {
            format!("{}.{}", self.package_name, self.type_name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_type_split() {
        let param = ApiParameterInfo::from_qualified_type("result".to_string(), "java.lang.String");
        assert_eq!(param.name, "result");
        assert_eq!(param.package_name, "java.lang");
        assert_eq!(param.type_name, "String");
        assert_eq!(param.qualified_type(), "java.lang.String");

        let primitive = ApiParameterInfo::from_qualified_type("flags".to_string(), "int");
        assert_eq!(primitive.package_name, "");
        assert_eq!(primitive.type_name, "int");
        assert_eq!(primitive.qualified_type(), "int");
    }

    #[test]
    fn test_constructor_detection() {
        let ctor = ApiMethodInfo::new("View".to_string());
        assert!(ctor.is_constructor_of("View"));

        let method = ApiMethodInfo::new("setVisibility".to_string());
        assert!(!method.is_constructor_of("View"));

        // Comparison is ordinal, not case-insensitive
        let near_miss = ApiMethodInfo::new("view".to_string());
        assert!(!near_miss.is_constructor_of("View"));
    }
}
