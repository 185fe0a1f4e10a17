//! Navigation shell: top bar plus a collapsible, multi-section side menu.
//!
//! Wide viewports get a fixed sidebar, narrow ones a slide-in overlay panel. Both read the
//! same per-section open flags and share nothing else.

/// Viewports narrower than this use the mobile presentation
pub const MOBILE_BREAKPOINT_PX: u32 = 992;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    Desktop,
    Mobile,
}

impl Presentation {
    pub fn for_viewport(width_px: u32) -> Self {
        if width_px < MOBILE_BREAKPOINT_PX {
            Presentation::Mobile
        } else {
            Presentation::Desktop
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Presentation::Desktop => "shell-desktop",
            Presentation::Mobile => "shell-mobile",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuSection {
    Visitors,
    Reports,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuLink {
    pub label: &'static str,
    pub href: &'static str,
}

const SECTION_COUNT: usize = 2;

impl MenuSection {
    pub const ALL: [MenuSection; SECTION_COUNT] = [MenuSection::Visitors, MenuSection::Reports];

    pub fn label(&self) -> &'static str {
        match self {
            MenuSection::Visitors => "Visitantes",
            MenuSection::Reports => "Reportes",
        }
    }

    pub fn links(&self) -> &'static [MenuLink] {
        match self {
            MenuSection::Visitors => &[
                MenuLink { label: "Registro de visitantes", href: "/visitantes" },
                MenuLink { label: "Nuevo visitante", href: "/visitantes/nuevo" },
            ],
            MenuSection::Reports => &[
                MenuLink { label: "Financiero", href: "/reportes/financieros" },
                MenuLink { label: "Áreas comunes", href: "/reportes/areas-comunes" },
                MenuLink { label: "Visual", href: "/reportes/visuales" },
            ],
        }
    }

    fn index(&self) -> usize {
        match self {
            MenuSection::Visitors => 0,
            MenuSection::Reports => 1,
        }
    }

    /// Section owning a path
    pub fn for_path(path: &str) -> Option<MenuSection> {
        best_link(path).map(|(section, _)| section)
    }
}

/// Link matching a path, by longest href prefix
fn best_link(path: &str) -> Option<(MenuSection, &'static MenuLink)> {
    MenuSection::ALL
        .into_iter()
        .flat_map(|section| section.links().iter().map(move |link| (section, link)))
        .filter(|(_, link)| path == link.href || path.starts_with(&format!("{}/", link.href)))
        .max_by_key(|(_, link)| link.href.len())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationShell {
    open: [bool; SECTION_COUNT],
    active_path: String,
    viewport_width: Option<u32>,
}

impl NavigationShell {
    /// Shell for a page; the section holding the page starts open.
    pub fn for_page(active_path: &str) -> Self {
        let mut shell = Self {
            open: [false; SECTION_COUNT],
            active_path: active_path.to_string(),
            viewport_width: None,
        };
        if let Some(section) = MenuSection::for_path(active_path) {
            shell.set_open(section, true);
        }
        shell
    }

    /// Known viewport width, e.g. from a client hint
    pub fn with_viewport(mut self, width_px: Option<u32>) -> Self {
        self.viewport_width = width_px;
        self
    }

    pub fn is_open(&self, section: MenuSection) -> bool {
        self.open[section.index()]
    }

    pub fn set_open(&mut self, section: MenuSection, open: bool) {
        self.open[section.index()] = open;
    }

    pub fn toggle(&mut self, section: MenuSection) {
        let idx = section.index();
        self.open[idx] = !self.open[idx];
    }

    pub fn active_path(&self) -> &str {
        &self.active_path
    }

    pub fn is_active(&self, link: &MenuLink) -> bool {
        best_link(&self.active_path).is_some_and(|(_, active)| active.href == link.href)
    }

    /// Presentations to render: the one matching a known width, otherwise both
    /// (a CSS media query at the same breakpoint picks one).
    pub fn presentations(&self) -> Vec<Presentation> {
        match self.viewport_width {
            Some(width) => vec![Presentation::for_viewport(width)],
            None => vec![Presentation::Desktop, Presentation::Mobile],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_selects_presentation() {
        assert_eq!(Presentation::for_viewport(375), Presentation::Mobile);
        assert_eq!(Presentation::for_viewport(991), Presentation::Mobile);
        assert_eq!(Presentation::for_viewport(992), Presentation::Desktop);
        assert_eq!(Presentation::for_viewport(1440), Presentation::Desktop);
    }

    #[test]
    fn active_section_starts_open() {
        let shell = NavigationShell::for_page("/reportes/visuales");
        assert!(shell.is_open(MenuSection::Reports));
        assert!(!shell.is_open(MenuSection::Visitors));

        let shell = NavigationShell::for_page("/visitantes/12/editar");
        assert!(shell.is_open(MenuSection::Visitors));
    }

    #[test]
    fn sections_toggle_independently() {
        let mut shell = NavigationShell::for_page("/visitantes");
        shell.toggle(MenuSection::Reports);
        assert!(shell.is_open(MenuSection::Visitors));
        assert!(shell.is_open(MenuSection::Reports));

        shell.toggle(MenuSection::Visitors);
        assert!(!shell.is_open(MenuSection::Visitors));
        assert!(shell.is_open(MenuSection::Reports));
    }

    #[test]
    fn client_hint_narrows_to_one_presentation() {
        let shell = NavigationShell::for_page("/visitantes");
        assert_eq!(shell.presentations().len(), 2);

        let shell = shell.with_viewport(Some(400));
        assert_eq!(shell.presentations(), vec![Presentation::Mobile]);
    }

    #[test]
    fn longest_link_wins_for_active_state() {
        let shell = NavigationShell::for_page("/visitantes/nuevo");
        let [list, new] = MenuSection::Visitors.links() else { panic!() };
        assert!(shell.is_active(new));
        assert!(!shell.is_active(list));
    }
}
