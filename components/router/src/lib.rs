use log::debug;
use serde::Serialize;

use collections::EntityKind;

static ADMIN: &str = "admin";
static LOGIN: &str = "login";
static DASHBOARD: &str = "dashboard";

/// Layout wrapped around a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shell {
    /// Header and footer of the public site.
    Public,
    /// Sidebar layout of the admin area.
    Admin,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdminView {
    Home,
    Manage(EntityKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Home,
    Directory,
    LegalInfo,
    Emergency,
    About,
    Contact,
    AdminLogin,
    Admin(AdminView),
}

impl Page {
    /// Links of the public navigation bar in display order.
    pub fn navigation() -> [Page; 6] {
        [
            Page::Home,
            Page::Directory,
            Page::LegalInfo,
            Page::Emergency,
            Page::About,
            Page::Contact,
        ]
    }

    /// Message key of the page title.
    pub fn title_key(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Directory => "directory",
            Page::LegalInfo => "legalInfo",
            Page::Emergency => "emergency",
            Page::About => "about",
            Page::Contact => "contact",
            Page::AdminLogin => "adminLogin",
            Page::Admin(AdminView::Home) => "dashboard",
            Page::Admin(AdminView::Manage(kind)) => match kind {
                EntityKind::Lawyer => "manageLawyers",
                EntityKind::Resource => "manageResources",
                EntityKind::Emergency => "manageEmergency",
                EntityKind::Office => "manageOffices",
            },
        }
    }

    pub fn path(&self) -> String {
        match self {
            Page::Home => String::from("/"),
            Page::Directory => String::from("/directory"),
            Page::LegalInfo => String::from("/legal-info"),
            Page::Emergency => String::from("/emergency"),
            Page::About => String::from("/about"),
            Page::Contact => String::from("/contact"),
            Page::AdminLogin => format!("/{}/{}", ADMIN, LOGIN),
            Page::Admin(AdminView::Home) => format!("/{}/{}", ADMIN, DASHBOARD),
            Page::Admin(AdminView::Manage(kind)) => {
                format!("/{}/{}/{}", ADMIN, DASHBOARD, kind.collection_name())
            }
        }
    }

    pub fn shell(&self) -> Shell {
        match self {
            Page::AdminLogin => Shell::None,
            Page::Admin(_) => Shell::Admin,
            _ => Shell::Public,
        }
    }
}

/// Outcome of matching a location, a page of `None` is the
/// public catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Route {
    pub shell: Shell,
    pub page: Option<Page>,
}

impl Route {
    fn at(page: Page) -> Self {
        Self {
            shell: page.shell(),
            page: Some(page),
        }
    }

    fn not_found() -> Self {
        Self {
            shell: Shell::Public,
            page: None,
        }
    }

    pub fn title_key(&self) -> Option<&'static str> {
        self.page.as_ref().map(Page::title_key)
    }
}

/// Path segments without query, fragment, empty or trailing parts.
fn segments(location: &str) -> Vec<&str> {
    let path = location
        .split(&['?', '#'][..])
        .next()
        .unwrap_or("");
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn manage(name: &str) -> Option<EntityKind> {
    EntityKind::all()
        .iter()
        .find(|kind| kind.collection_name() == name)
        .copied()
}

pub fn resolve(location: &str) -> Route {
    let route = match segments(location).as_slice() {
        [] => Route::at(Page::Home),
        ["directory"] => Route::at(Page::Directory),
        ["legal-info"] => Route::at(Page::LegalInfo),
        ["emergency"] => Route::at(Page::Emergency),
        ["about"] => Route::at(Page::About),
        ["contact"] => Route::at(Page::Contact),
        [admin, login] if *admin == ADMIN && *login == LOGIN => {
            Route::at(Page::AdminLogin)
        }
        [admin, dashboard] if *admin == ADMIN && *dashboard == DASHBOARD => {
            Route::at(Page::Admin(AdminView::Home))
        }
        [admin, dashboard, name] if *admin == ADMIN && *dashboard == DASHBOARD => {
            match manage(name) {
                Some(kind) => Route::at(Page::Admin(AdminView::Manage(kind))),
                None => Route::not_found(),
            }
        }
        _ => Route::not_found(),
    };
    debug!("{} -> {:?}", location, route);
    route
}

#[cfg(test)]
mod tests {
    use collections::EntityKind;

    use crate::{resolve, AdminView, Page, Shell};

    #[test]
    fn public_pages() {
        for page in Page::navigation().iter() {
            let route = resolve(&page.path());
            assert_eq!(Shell::Public, route.shell);
            assert_eq!(Some(*page), route.page);
        }
        assert_eq!(Some(Page::Home), resolve("").page);
    }

    #[test]
    fn admin_pages() {
        let login = resolve("/admin/login");
        assert_eq!(Shell::None, login.shell);
        assert_eq!(Some(Page::AdminLogin), login.page);

        let home = resolve("/admin/dashboard");
        assert_eq!(Shell::Admin, home.shell);
        assert_eq!(Some("dashboard"), home.title_key());

        for kind in EntityKind::all().iter() {
            let page = Page::Admin(AdminView::Manage(*kind));
            let route = resolve(&page.path());
            assert_eq!(Shell::Admin, route.shell);
            assert_eq!(Some(page), route.page);
        }
        assert_eq!(
            Some("manageOffices"),
            resolve("/admin/dashboard/offices").title_key()
        );
    }

    #[test]
    fn trailing_slash_query_and_fragment() {
        assert_eq!(Some(Page::Directory), resolve("/directory/").page);
        assert_eq!(Some(Page::Directory), resolve("/directory?q=addis").page);
        assert_eq!(Some(Page::Contact), resolve("/contact#form").page);
        assert_eq!(
            Some(Page::Admin(AdminView::Manage(EntityKind::Lawyer))),
            resolve("/admin/dashboard/lawyers/").page
        );
    }

    #[test]
    fn catch_all() {
        for path in &[
            "/unknown",
            "/directory/1",
            "/admin",
            "/admin/dashboard/users",
            "/admin/login/extra",
        ] {
            let route = resolve(path);
            assert_eq!(Shell::Public, route.shell, "{}", path);
            assert_eq!(None, route.page, "{}", path);
            assert_eq!(None, route.title_key());
        }
    }
}
