//! Named route table.
//!
//! Resources are registered under their namespaced name (`notes:detail`) and
//! handlers build redirect paths with [`RouteName::reverse`].

use std::fmt;

/// Every named page route served by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteName {
    Home,
    List,
    Add,
    Detail,
    Edit,
    Delete,
    Success,
    Login,
    Logout,
    Signup,
}

impl RouteName {
    /// Namespaced route name, for example `notes:home`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Home => "notes:home",
            Self::List => "notes:list",
            Self::Add => "notes:add",
            Self::Detail => "notes:detail",
            Self::Edit => "notes:edit",
            Self::Delete => "notes:delete",
            Self::Success => "notes:success",
            Self::Login => "users:login",
            Self::Logout => "users:logout",
            Self::Signup => "users:signup",
        }
    }

    /// Actix path pattern.
    pub const fn pattern(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::List => "/notes/",
            Self::Add => "/add/",
            Self::Detail => "/note/{slug}/",
            Self::Edit => "/edit/{slug}/",
            Self::Delete => "/delete/{slug}/",
            Self::Success => "/done/",
            Self::Login => "/auth/login/",
            Self::Logout => "/auth/logout/",
            Self::Signup => "/auth/signup/",
        }
    }

    /// Build the request path, filling `{...}` segments from `args` in order.
    ///
    /// Missing arguments leave the placeholder empty.
    ///
    /// # Examples
    /// ```
    /// use backend::inbound::http::routes::RouteName;
    ///
    /// assert_eq!(RouteName::List.reverse(&[]), "/notes/");
    /// assert_eq!(RouteName::Edit.reverse(&["note-slug"]), "/edit/note-slug/");
    /// ```
    pub fn reverse(self, args: &[&str]) -> String {
        let mut args = args.iter();
        let mut path = String::with_capacity(self.pattern().len());
        let mut rest = self.pattern();
        while let Some(open) = rest.find('{') {
            path.push_str(&rest[..open]);
            let Some(close) = rest[open..].find('}') else {
                break;
            };
            if let Some(arg) = args.next() {
                path.push_str(arg);
            }
            rest = &rest[open + close + 1..];
        }
        path.push_str(rest);
        path
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
