//! Implicit ARIA roles for host elements.

/// The implicit role of a host tag, when it has one that Testing Library
/// can query with `getAllByRole`.
pub fn implicit_role(tag: &str, input_type: Option<&str>) -> Option<&'static str> {
    let role = match tag {
        "a" => "link",
        "article" => "article",
        "aside" => "complementary",
        "button" => "button",
        "dialog" => "dialog",
        "footer" => "contentinfo",
        "form" => "form",
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => "heading",
        "header" => "banner",
        "hr" => "separator",
        "img" => "img",
        "input" => return input_role(input_type),
        "li" => "listitem",
        "main" => "main",
        "nav" => "navigation",
        "ol" | "ul" => "list",
        "option" => "option",
        "progress" => "progressbar",
        "section" => "region",
        "select" => "combobox",
        "table" => "table",
        "tbody" | "thead" | "tfoot" => "rowgroup",
        "td" => "cell",
        "textarea" => "textbox",
        "th" => "columnheader",
        "tr" => "row",
        _ => return None,
    };
    Some(role)
}

fn input_role(input_type: Option<&str>) -> Option<&'static str> {
    match input_type.unwrap_or("text") {
        "checkbox" => Some("checkbox"),
        "radio" => Some("radio"),
        "range" => Some("slider"),
        "number" => Some("spinbutton"),
        "search" => Some("searchbox"),
        "button" | "submit" | "reset" | "image" => Some("button"),
        "hidden" | "file" | "color" | "date" | "datetime-local" | "month" | "time"
        | "week" | "password" => None,
        _ => Some("textbox"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inputs_map_by_type() {
        assert_eq!(implicit_role("input", None), Some("textbox"));
        assert_eq!(implicit_role("input", Some("checkbox")), Some("checkbox"));
        assert_eq!(implicit_role("input", Some("password")), None);
    }

    #[test]
    fn containers_without_semantics_have_no_role() {
        assert_eq!(implicit_role("div", None), None);
        assert_eq!(implicit_role("span", None), None);
        assert_eq!(implicit_role("Spinner", None), None);
    }
}
