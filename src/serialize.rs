use crate::catalog::Catalog;
use std::io;
use std::path::Path;

/// Reserved identifier keywords of the managed binding language. A parameter
/// name that collides with one of these (or is not a plain identifier) is
/// emitted with an '@' prefix.
const RESERVED_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// Escape text for use in XML attribute values and element bodies
pub fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn is_valid_identifier(name: &str) -> bool {
    if name.is_empty() || RESERVED_KEYWORDS.contains(&name) {
        return false;
    }

    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Prefix names that would collide with a reserved keyword
fn safe_parameter_name(name: &str) -> String {
    if is_valid_identifier(name) {
        name.to_string()
    } else {
        format!("@{}", name)
    }
}

/// Render the catalog as a flat name-override document: one `attr` record
/// per (method, parameter) pair, keyed by an XPath locator that pins down
/// the method through its name, arity and parameter type conjunction.
pub fn render_override_metadata(catalog: &Catalog) -> String {
    let mut out = String::new();
    out.push_str("<metadata>\n");

    for object in catalog.objects() {
        let element = if object.is_interface { "interface" } else { "class" };

        for method in &object.methods {
            let type_conjunction = method
                .parameters
                .iter()
                .enumerate()
                .map(|(index, param)| {
                    format!(
                        "parameter[{}][@type='{}']",
                        index + 1,
                        xml_escape(&param.qualified_type())
                    )
                })
                .collect::<Vec<_>>()
                .join(" and ");

            for (index, param) in method.parameters.iter().enumerate() {
                let xpath = format!(
                    "/api/package[@name='{}']/{}[@name='{}']/method[@name='{}' and count(parameter)={} and {}]/parameter[{}]",
                    xml_escape(&object.package_name),
                    element,
                    xml_escape(&object.type_name),
                    xml_escape(&method.name),
                    method.parameters.len(),
                    type_conjunction,
                    index + 1
                );

                out.push_str(&format!(
                    "  <attr path=\"{}\" name=\"managedName\">{}</attr>\n",
                    xpath,
                    safe_parameter_name(&xml_escape(&param.name))
                ));
            }
        }
    }

    out.push_str("</metadata>\n");
    out
}

/// Render the catalog as a nested descriptive document:
/// package -> class|interface -> constructor|method -> parameter
pub fn render_descriptive_xml(catalog: &Catalog) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    out.push_str("<api>\n");

    for (package, members) in catalog.by_package() {
        out.push_str(&format!("  <package name=\"{}\">\n", xml_escape(package)));

        for object in members {
            let element = if object.is_interface { "interface" } else { "class" };
            out.push_str(&format!(
                "    <{} name=\"{}\">\n",
                element,
                xml_escape(&object.type_name)
            ));

            for method in &object.methods {
                let method_element = if method.is_constructor_of(&object.type_name) {
                    "constructor"
                } else {
                    "method"
                };
                out.push_str(&format!(
                    "      <{} name=\"{}\">\n",
                    method_element,
                    xml_escape(&method.name)
                ));

                for param in &method.parameters {
                    out.push_str(&format!(
                        "        <parameter name=\"{}\" type=\"{}\"/>\n",
                        xml_escape(&safe_parameter_name(&param.name)),
                        xml_escape(&param.qualified_type())
                    ));
                }

                out.push_str(&format!("      </{}>\n", method_element));
            }

            out.push_str(&format!("    </{}>\n", element));
        }

        out.push_str("  </package>\n");
    }

    out.push_str("</api>\n");
    out
}

pub fn write_override_metadata(path: &Path, catalog: &Catalog) -> io::Result<()> {
    std::fs::write(path, render_override_metadata(catalog))
}

pub fn write_descriptive_xml(path: &Path, catalog: &Catalog) -> io::Result<()> {
    std::fs::write(path, render_descriptive_xml(catalog))
}
