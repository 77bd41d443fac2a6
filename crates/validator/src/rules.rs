/// A single field validation rule, parsed from its textual form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// The trimmed value must be non-empty.
    Required,
    /// The value must look like an email address.
    Email,
    /// No record in `table` may already hold this value in `column`.
    Unique { table: String, column: String },
}

impl Rule {
    /// Parses a pipe-separated rule string, e.g. `required|email|unique:users,email`.
    ///
    /// Unknown rule names are dropped without error so a caller can carry
    /// rules this build does not understand yet. A `unique` that does not
    /// name both a table and a column is dropped the same way.
    pub fn parse_list(spec: &str) -> Vec<Rule> {
        spec.split('|').filter_map(Rule::parse).collect()
    }

    fn parse(token: &str) -> Option<Rule> {
        let (name, arg) = match token.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (token, None),
        };

        match name {
            "required" => Some(Rule::Required),
            "email" => Some(Rule::Email),
            "unique" => {
                let (table, column) = arg?.split_once(',')?;
                if table.is_empty() || column.is_empty() {
                    return None;
                }
                Some(Rule::Unique {
                    table: table.to_string(),
                    column: column.to_string(),
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_full_rule_string() {
        let rules = Rule::parse_list("required|email|unique:users,email");
        assert_eq!(
            rules,
            vec![
                Rule::Required,
                Rule::Email,
                Rule::Unique {
                    table: "users".to_string(),
                    column: "email".to_string(),
                },
            ]
        );
    }

    #[test]
    fn preserves_declaration_order() {
        let rules = Rule::parse_list("email|required");
        assert_eq!(rules, vec![Rule::Email, Rule::Required]);
    }

    #[test]
    fn unknown_rule_names_are_dropped() {
        let rules = Rule::parse_list("required|shouty|email");
        assert_eq!(rules, vec![Rule::Required, Rule::Email]);
    }

    #[test]
    fn unique_without_arguments_is_dropped() {
        assert_eq!(Rule::parse_list("unique"), vec![]);
        assert_eq!(Rule::parse_list("unique:users"), vec![]);
        assert_eq!(Rule::parse_list("unique:,email"), vec![]);
    }

    #[test]
    fn empty_rule_string_parses_to_nothing() {
        assert_eq!(Rule::parse_list(""), vec![]);
    }
}
