use super::model::{Card, Owner, Portfolio, Section, SectionBody, ToolGroup};
use crate::navigator::SectionId;

fn card(title: &str, subtitle: Option<&str>, body: &str, tags: &[&str]) -> Card {
    Card {
        title: title.to_string(),
        subtitle: subtitle.map(str::to_string),
        body: body.to_string(),
        tags: tags.iter().map(|t| (*t).to_string()).collect(),
        link: None,
    }
}

fn group(name: &str, tools: &[&str]) -> ToolGroup {
    ToolGroup {
        name: name.to_string(),
        tools: tools.iter().map(|t| (*t).to_string()).collect(),
    }
}

/// Built-in content used when no `--content` file is given.
pub fn default_portfolio() -> Portfolio {
    Portfolio {
        owner: Owner {
            name: "folio".to_string(),
            tagline: "A portfolio that lives in your terminal".to_string(),
        },
        sections: vec![
            Section {
                id: SectionId::from("about"),
                title: "About".to_string(),
                body: SectionBody::Cards {
                    items: vec![
                        card(
                            "Hello",
                            Some("Welcome"),
                            "Scroll past the end of a page, swipe with the mouse, or use the \
                             arrow keys to move between sections.",
                            &["intro"],
                        ),
                        card(
                            "What I do",
                            None,
                            "Backend services, command-line tools and the occasional parser.",
                            &["backend", "cli"],
                        ),
                        card(
                            "Currently",
                            None,
                            "Learning how terminals handle mouse input, one escape code at a time.",
                            &["learning"],
                        ),
                    ],
                },
            },
            Section {
                id: SectionId::from("projects"),
                title: "Projects".to_string(),
                body: SectionBody::Cards {
                    items: vec![
                        card(
                            "folio",
                            Some("Terminal portfolio"),
                            "This very program: paged sections driven by wheel, drag and keys.",
                            &["rust", "ratatui"],
                        ),
                        card(
                            "Log shipper",
                            Some("Side project"),
                            "Tails files and forwards structured lines over HTTP with retries.",
                            &["rust", "tokio"],
                        ),
                        card(
                            "Dotfiles",
                            None,
                            "Shell, editor and terminal configuration kept in one repository.",
                            &["shell"],
                        ),
                    ],
                },
            },
            Section {
                id: SectionId::from("toolbox"),
                title: "Toolbox".to_string(),
                body: SectionBody::Accordion {
                    groups: vec![
                        group("Languages", &["Rust", "Go", "TypeScript", "Bash"]),
                        group("Frameworks", &["Tokio", "Axum", "Ratatui"]),
                        group("Infrastructure", &["Docker", "Nix", "PostgreSQL"]),
                        group("Editors", &["Neovim", "Helix"]),
                    ],
                },
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_portfolio_is_valid() {
        let portfolio = default_portfolio();
        assert!(portfolio.validate().is_ok());
        let order = portfolio.order().expect("order");
        let ids: Vec<&str> = order.iter().map(SectionId::as_str).collect();
        assert_eq!(ids, vec!["about", "projects", "toolbox"]);
    }
}
