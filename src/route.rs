use std::sync::OnceLock;

use regex::Regex;

use crate::errors::WikiError;
use crate::types::Title;

/// The three page operations the wiki knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    View,
    Edit,
    Save,
}

fn action_path_re() -> &'static Regex {
    static ACTION_PATH: OnceLock<Regex> = OnceLock::new();
    ACTION_PATH.get_or_init(|| {
        Regex::new(r"^/(edit|save|view)/([A-Za-z0-9]+)$").expect("invalid action path regex")
    })
}

/// Match a request path against `/(edit|save|view)/<title>`.
///
/// This is the sole gate against path traversal: anything that does not
/// match exactly is rejected before any file I/O happens.
pub fn parse_action_path(path: &str) -> Result<(Action, Title), WikiError> {
    let caps = action_path_re()
        .captures(path)
        .ok_or(WikiError::InvalidPath)?;
    let action = match &caps[1] {
        "view" => Action::View,
        "edit" => Action::Edit,
        "save" => Action::Save,
        _ => return Err(WikiError::InvalidPath),
    };
    let title = Title::parse(&caps[2])?;
    Ok((action, title))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_operations() {
        let (action, title) = parse_action_path("/view/FrontPage").unwrap();
        assert_eq!(action, Action::View);
        assert_eq!(title.as_str(), "FrontPage");

        let (action, _) = parse_action_path("/edit/Page2").unwrap();
        assert_eq!(action, Action::Edit);

        let (action, _) = parse_action_path("/save/X").unwrap();
        assert_eq!(action, Action::Save);
    }

    #[test]
    fn rejects_unknown_operations() {
        for path in ["/delete/FrontPage", "/View/FrontPage", "/viewx/Foo", "/"] {
            assert!(
                matches!(parse_action_path(path), Err(WikiError::InvalidPath)),
                "accepted {:?}",
                path
            );
        }
    }

    #[test]
    fn rejects_traversal_and_extra_segments() {
        for path in [
            "/view/../etc",
            "/view/Foo/Bar",
            "/view/Foo.txt",
            "/view/Foo%20Bar",
            "/edit/",
            "/view/Foo/",
        ] {
            assert!(
                matches!(parse_action_path(path), Err(WikiError::InvalidPath)),
                "accepted {:?}",
                path
            );
        }
    }
}
