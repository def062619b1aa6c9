//! Identifier casing
//!
//! Module ids (`process_specification`) and class names
//! (`processSpecification`) are split into words on separators and on
//! lower-to-upper boundaries, then re-joined in the target case.

/// Split an identifier into words
pub fn split_words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            // fooBar | XMLHttp
            if prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_is_lower) {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// `process_specification` -> `process-specification`
pub fn param_case(input: &str) -> String {
    split_words(input)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// `process_specification` -> `Process Specification`
pub fn capital_case(input: &str) -> String {
    split_words(input)
        .iter()
        .map(|w| capitalize(w))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `processSpecification` -> `ProcessSpecification`
pub fn pascal_case(input: &str) -> String {
    split_words(input).iter().map(|w| capitalize(w)).collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("process_specification"), vec!["process", "specification"]);
        assert_eq!(split_words("economicEvent"), vec!["economic", "Event"]);
        assert_eq!(split_words("XMLHttpRequest"), vec!["XML", "Http", "Request"]);
        assert_eq!(split_words("  spaced--out  "), vec!["spaced", "out"]);
        assert!(split_words("").is_empty());
    }

    #[test]
    fn test_param_case() {
        assert_eq!(param_case("process_specification"), "process-specification");
        assert_eq!(param_case("resourceSpecification"), "resource-specification");
        assert_eq!(param_case("agent"), "agent");
    }

    #[test]
    fn test_capital_case() {
        assert_eq!(capital_case("process_specification"), "Process Specification");
        assert_eq!(capital_case("observation"), "Observation");
    }

    #[test]
    fn test_pascal_case() {
        assert_eq!(pascal_case("processSpecification"), "ProcessSpecification");
        assert_eq!(pascal_case("proposedTo"), "ProposedTo");
        assert_eq!(pascal_case("unit"), "Unit");
    }
}
