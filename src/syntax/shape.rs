//! Resolver module shape matching
//!
//! A resolver module default-exports a factory function whose last statement
//! returns the resolver map:
//!
//! ```ts
//! export default (dnaConfig: DNAIdMappings, conductorUri: string) => {
//!   const readAgent = mapZomeFn(dnaConfig, conductorUri, 'agent', 'agent', 'get_agent')
//!   const myAgent = async (root, args) => { ... }
//!
//!   return {
//!     myAgent,
//!     agent: injectTypename('Agent', async (root, args) => { ... }),
//!     agents: async (root, args) => { throw new Error('unimplemented') },
//!   }
//! }
//! ```
//!
//! Anything that deviates from this shape is reported as a [`ShapeError`].
//! A module without a default export is not an error: it simply has no map.

use super::{statements, text};
use tree_sitter::Node;

/// Node kinds that denote a function value
const FUNCTION_KINDS: &[&str] = &[
    "arrow_function",
    "function_expression",
    "function",
    "generator_function",
    "function_declaration",
    "generator_function_declaration",
];

/// Structural mismatch in a resolver module
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("default export is a {found}, expected a function")]
    DefaultExportNotFunction { found: String },

    #[error("default export function has no block body")]
    DefaultExportBodyNotBlock,

    #[error("last statement of the default export should be a return statement, found {found}")]
    MissingReturn { found: String },

    #[error("default export returns a {found}, expected an object literal")]
    ReturnNotObject { found: String },

    #[error("unsupported {kind} in the returned resolver map (line {line})")]
    UnsupportedProperty { kind: String, line: usize },

    #[error("declaration of `{name}` has no initializer")]
    DeclarationWithoutInitializer { name: String },

    #[error("resolver `{name}` is implemented by a {found}, expected a call or a function")]
    UnrecognizedImplementation { name: String, found: String },
}

/// One entry of a returned resolver map
#[derive(Debug, Clone)]
pub struct ResolverEntry<'tree> {
    pub name: String,
    /// The expression implementing the resolver, if one could be located
    pub implementation: Option<Node<'tree>>,
    /// 1-based line of the map entry
    pub line: usize,
}

/// The resolver map returned by a module's default export
#[derive(Debug, Clone, Default)]
pub struct ResolverMap<'tree> {
    pub entries: Vec<ResolverEntry<'tree>>,
}

/// How a resolver's implementation expression looks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImplementationShape {
    /// Nothing in scope implements the resolver
    Missing,
    /// Produced by a call, e.g. `injectTypename(...)` or `mapZomeFn(...)`
    FactoryCall,
    /// A function whose first statement is a `throw`
    ThrowingStub,
    /// Any other function
    Function,
}

/// Locate the resolver map of a parsed module.
///
/// Returns `Ok(None)` when the module has no default export.
pub fn resolver_map<'tree>(
    root: Node<'tree>,
    source: &[u8],
) -> Result<Option<ResolverMap<'tree>>, ShapeError> {
    let Some(export) = statements(root).into_iter().find(|n| is_default_export(*n)) else {
        return Ok(None);
    };

    let function = export
        .child_by_field_name("value")
        .or_else(|| export.child_by_field_name("declaration"));
    let function = match function {
        Some(node) if FUNCTION_KINDS.contains(&node.kind()) => node,
        Some(node) => {
            return Err(ShapeError::DefaultExportNotFunction { found: node.kind().to_string() });
        }
        None => {
            return Err(ShapeError::DefaultExportNotFunction { found: "nothing".to_string() });
        }
    };

    let body = function
        .child_by_field_name("body")
        .filter(|b| b.kind() == "statement_block")
        .ok_or(ShapeError::DefaultExportBodyNotBlock)?;
    let body_statements = statements(body);

    let object = match body_statements.last() {
        Some(stmt) if stmt.kind() == "return_statement" => match statements(*stmt).first() {
            Some(value) if value.kind() == "object" => *value,
            Some(value) => {
                return Err(ShapeError::ReturnNotObject { found: value.kind().to_string() });
            }
            None => return Err(ShapeError::ReturnNotObject { found: "nothing".to_string() }),
        },
        Some(stmt) => return Err(ShapeError::MissingReturn { found: stmt.kind().to_string() }),
        None => return Err(ShapeError::MissingReturn { found: "an empty body".to_string() }),
    };

    let mut map = ResolverMap::default();
    for property in statements(object) {
        let line = property.start_position().row + 1;
        let entry = match property.kind() {
            "pair" => {
                let key = property
                    .child_by_field_name("key")
                    .ok_or_else(|| unsupported(property))?;
                let name = property_name(key, source)?;
                let implementation = match property.child_by_field_name("value") {
                    // `name: someHandler` points at a declaration in the factory body;
                    // anything else (e.g. an import) stays a bare identifier and is rejected
                    Some(value) if value.kind() == "identifier" => {
                        declared_initializer(&body_statements, text(value, source), source)?
                            .or(Some(value))
                    }
                    value => value,
                };
                ResolverEntry { name, implementation, line }
            }
            "shorthand_property_identifier" => {
                let name = text(property, source).to_string();
                let implementation = declared_initializer(&body_statements, &name, source)?;
                ResolverEntry { name, implementation, line }
            }
            "method_definition" => {
                let key = property
                    .child_by_field_name("name")
                    .ok_or_else(|| unsupported(property))?;
                let name = property_name(key, source)?;
                let implementation = declared_initializer(&body_statements, &name, source)?;
                ResolverEntry { name, implementation, line }
            }
            _ => return Err(unsupported(property)),
        };
        map.entries.push(entry);
    }

    Ok(Some(map))
}

/// Classify the implementation expression of a resolver entry
pub fn implementation_shape(
    name: &str,
    implementation: Option<Node<'_>>,
) -> Result<ImplementationShape, ShapeError> {
    let Some(node) = implementation else {
        return Ok(ImplementationShape::Missing);
    };

    if node.kind() == "call_expression" {
        return Ok(ImplementationShape::FactoryCall);
    }

    if !FUNCTION_KINDS.contains(&node.kind()) {
        return Err(ShapeError::UnrecognizedImplementation {
            name: name.to_string(),
            found: node.kind().to_string(),
        });
    }

    let first_statement = node
        .child_by_field_name("body")
        .filter(|b| b.kind() == "statement_block")
        .and_then(|b| statements(b).first().copied());

    match first_statement {
        Some(stmt) if stmt.kind() == "throw_statement" => Ok(ImplementationShape::ThrowingStub),
        _ => Ok(ImplementationShape::Function),
    }
}

fn is_default_export(node: Node<'_>) -> bool {
    if node.kind() != "export_statement" {
        return false;
    }
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|c| c.kind() == "default");
    found
}

fn property_name(key: Node<'_>, source: &[u8]) -> Result<String, ShapeError> {
    match key.kind() {
        "property_identifier" | "private_property_identifier" | "number" => {
            Ok(text(key, source).to_string())
        }
        "string" => Ok(text(key, source).trim_matches(|c| c == '"' || c == '\'').to_string()),
        _ => Err(unsupported(key)),
    }
}

/// Initializer of the top-level declaration named `name` in the factory body.
///
/// Only the first declarator of each declaration is considered.
fn declared_initializer<'tree>(
    body_statements: &[Node<'tree>],
    name: &str,
    source: &[u8],
) -> Result<Option<Node<'tree>>, ShapeError> {
    for stmt in body_statements {
        if !matches!(stmt.kind(), "lexical_declaration" | "variable_declaration") {
            continue;
        }
        let Some(declarator) = statements(*stmt)
            .into_iter()
            .find(|n| n.kind() == "variable_declarator")
        else {
            continue;
        };
        let declared = declarator.child_by_field_name("name").map(|n| text(n, source));
        if declared != Some(name) {
            continue;
        }
        return match declarator.child_by_field_name("value") {
            Some(value) => Ok(Some(value)),
            None => Err(ShapeError::DeclarationWithoutInitializer { name: name.to_string() }),
        };
    }
    Ok(None)
}

fn unsupported(node: Node<'_>) -> ShapeError {
    ShapeError::UnsupportedProperty {
        kind: node.kind().to_string(),
        line: node.start_position().row + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{parse, SourceLanguage};

    fn shapes(source: &str) -> Result<Option<Vec<(String, ImplementationShape)>>, ShapeError> {
        let tree = parse(SourceLanguage::TypeScript, source).expect("Failed to parse");
        let Some(map) = resolver_map(tree.root_node(), source.as_bytes())? else {
            return Ok(None);
        };
        map.entries
            .into_iter()
            .map(|e| Ok((e.name.clone(), implementation_shape(&e.name, e.implementation)?)))
            .collect::<Result<Vec<_>, ShapeError>>()
            .map(Some)
    }

    #[test]
    fn test_inline_entries() {
        let source = r#"
import { injectTypename } from '../types'

export default (dnaConfig: DNAIdMappings, conductorUri: string) => {
  return {
    foo: () => { throw new Error('not implemented') },
    bar: injectTypename('Bar', async (root, args) => { return args }),
    qux: async function (root, args) {
      // look it up
      const res = await read(args)
      return res
    },
  }
}
"#;
        let result = shapes(source).expect("Shape error").expect("No map");
        assert_eq!(
            result,
            vec![
                ("foo".to_string(), ImplementationShape::ThrowingStub),
                ("bar".to_string(), ImplementationShape::FactoryCall),
                ("qux".to_string(), ImplementationShape::Function),
            ]
        );
    }

    #[test]
    fn test_entries_resolved_from_declarations() {
        let source = r#"
export default (dnaConfig, conductorUri) => {
  const readAll = mapZomeFn(dnaConfig, conductorUri, 'agent', 'agent', 'get_all')
  const baz = () => { return 1 }
  const stub = async () => {
    throw new Error('unimplemented')
  }

  return {
    baz: baz,
    stub,
    readAll,
    missing,
  }
}
"#;
        let result = shapes(source).expect("Shape error").expect("No map");
        assert_eq!(
            result,
            vec![
                ("baz".to_string(), ImplementationShape::Function),
                ("stub".to_string(), ImplementationShape::ThrowingStub),
                ("readAll".to_string(), ImplementationShape::FactoryCall),
                ("missing".to_string(), ImplementationShape::Missing),
            ]
        );
    }

    #[test]
    fn test_aliased_identifier_uses_declaration() {
        let source = r#"
export default () => {
  const handler = () => { throw new Error('todo') }
  return { renamed: handler }
}
"#;
        let result = shapes(source).expect("Shape error").expect("No map");
        assert_eq!(result, vec![("renamed".to_string(), ImplementationShape::ThrowingStub)]);
    }

    #[test]
    fn test_only_first_declarator_is_considered() {
        let source = r#"
export default () => {
  const a = () => { return 1 }, b = () => { return 2 }
  return { b }
}
"#;
        let result = shapes(source).expect("Shape error").expect("No map");
        assert_eq!(result, vec![("b".to_string(), ImplementationShape::Missing)]);
    }

    #[test]
    fn test_function_default_export_and_string_keys() {
        let source = r#"
export default function (dnaConfig) {
  return {
    'quoted': () => { return 1 },
    expressionBody: () => 1,
    empty: () => {},
  }
}
"#;
        let result = shapes(source).expect("Shape error").expect("No map");
        assert_eq!(
            result,
            vec![
                ("quoted".to_string(), ImplementationShape::Function),
                ("expressionBody".to_string(), ImplementationShape::Function),
                ("empty".to_string(), ImplementationShape::Function),
            ]
        );
    }

    #[test]
    fn test_no_default_export() {
        let source = "export const helper = () => 1\nexport type Foo = string\n";
        assert_eq!(shapes(source), Ok(None));
    }

    #[test]
    fn test_malformed_default_exports() {
        assert_eq!(
            shapes("export default { foo: 1 }\n"),
            Err(ShapeError::DefaultExportNotFunction { found: "object".to_string() })
        );
        assert_eq!(
            shapes("export default () => ({ foo })\n"),
            Err(ShapeError::DefaultExportBodyNotBlock)
        );
        assert_eq!(
            shapes("export default () => { const x = 1 }\n"),
            Err(ShapeError::MissingReturn { found: "lexical_declaration".to_string() })
        );
        assert_eq!(
            shapes("export default () => {}\n"),
            Err(ShapeError::MissingReturn { found: "an empty body".to_string() })
        );
        assert_eq!(
            shapes("export default () => { return [1, 2] }\n"),
            Err(ShapeError::ReturnNotObject { found: "array".to_string() })
        );
    }

    #[test]
    fn test_malformed_entries() {
        let spread = shapes("export default () => { return { ...others } }\n");
        assert!(matches!(spread, Err(ShapeError::UnsupportedProperty { ref kind, line: 1 }) if kind == "spread_element"));

        let uninitialized = shapes("export default () => {\n  let foo\n  return { foo }\n}\n");
        assert_eq!(
            uninitialized,
            Err(ShapeError::DeclarationWithoutInitializer { name: "foo".to_string() })
        );

        let literal = shapes("export default () => { return { foo: 42 } }\n");
        assert_eq!(
            literal,
            Err(ShapeError::UnrecognizedImplementation {
                name: "foo".to_string(),
                found: "number".to_string(),
            })
        );
    }

    #[test]
    fn test_imported_identifier_is_rejected() {
        let source = r#"
import { readAgent } from './agents'

export default () => {
  return { agent: readAgent }
}
"#;
        assert_eq!(
            shapes(source),
            Err(ShapeError::UnrecognizedImplementation {
                name: "agent".to_string(),
                found: "identifier".to_string(),
            })
        );
    }
}
