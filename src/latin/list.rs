//! Latin list formatting.

/// Join items as `a, b et c`.
#[must_use]
pub fn list_to_string<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(AsRef::as_ref).collect();
            format!("{} et {}", head.join(", "), last.as_ref())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_to_string() {
        let empty: [&str; 0] = [];
        assert_eq!(list_to_string(&empty), "");
        assert_eq!(list_to_string(&["gladius"]), "gladius");
        assert_eq!(list_to_string(&["gladius", "saccus"]), "gladius et saccus");
        assert_eq!(
            list_to_string(&["strophiō", "subligāculō", "tunicā"]),
            "strophiō, subligāculō et tunicā"
        );
    }
}
