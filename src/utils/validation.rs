use validator::{ValidationErrors, ValidationErrorsKind};

use crate::services::validation_service::FieldError;

/// Flattens derive-level errors into `field`/`message` pairs with
/// `parent.child[i].leaf` paths, sorted by path.
pub fn field_errors(prefix: &str, errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    collect(prefix, errors, &mut out);
    out.sort_by(|a, b| segments(&a.field).cmp(&segments(&b.field)));
    out
}

#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum Segment<'a> {
    Name(&'a str),
    Index(usize),
}

/// `answers[10].id` orders after `answers[2].id`.
fn segments(path: &str) -> Vec<Segment<'_>> {
    path.split(['.', '[', ']'])
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().map(Segment::Index).unwrap_or(Segment::Name(s)))
        .collect()
}

fn collect(prefix: &str, errors: &ValidationErrors, out: &mut Vec<FieldError>) {
    for (name, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", prefix, name)
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for err in list {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value ({})", err.code));
                    out.push(FieldError::new(path.clone(), message));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (idx, inner) in items {
                    collect(&format!("{}[{}]", path, idx), inner, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Leaf {
        #[validate(length(min = 1, message = "required"))]
        name: String,
    }

    #[derive(Validate)]
    struct Root {
        #[validate(nested)]
        leaves: Vec<Leaf>,
    }

    #[test]
    fn nested_list_errors_get_indexed_paths() {
        let root = Root {
            leaves: vec![
                Leaf { name: "ok".into() },
                Leaf {
                    name: String::new(),
                },
            ],
        };
        let errors = root.validate().unwrap_err();
        let flat = field_errors("", &errors);
        assert_eq!(flat, vec![FieldError::new("leaves[1].name", "required")]);
    }

    #[test]
    fn list_indices_sort_numerically() {
        let mut leaves: Vec<Leaf> = (0..12).map(|_| Leaf { name: "ok".into() }).collect();
        leaves[2].name.clear();
        leaves[10].name.clear();
        let errors = Root { leaves }.validate().unwrap_err();
        let fields: Vec<String> = field_errors("", &errors)
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["leaves[2].name", "leaves[10].name"]);
    }
}
