pub const DEFAULT_MOBILE_HIDE: &str = "max-md:hidden";
pub const DEFAULT_TABLET_HIDE: &str = "md:max-lg:hidden";
pub const DEFAULT_DESKTOP_HIDE: &str = "lg:hidden";

/// Responsive class fragments contributed by each hide flag.
///
/// Each flag maps to its own fragment independently of the other two. Setting
/// all three is accepted and yields a block hidden at every breakpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityClasses {
    pub mobile: String,
    pub tablet: String,
    pub desktop: String,
}

impl Default for VisibilityClasses {
    fn default() -> Self {
        Self {
            mobile: DEFAULT_MOBILE_HIDE.to_string(),
            tablet: DEFAULT_TABLET_HIDE.to_string(),
            desktop: DEFAULT_DESKTOP_HIDE.to_string(),
        }
    }
}

impl VisibilityClasses {
    /// Compose the presentation classes for a block.
    ///
    /// Custom classes are appended verbatim, last. Absent or blank inputs
    /// contribute nothing, so the result never has stray separators.
    pub fn classes(
        &self,
        hide_on_mobile: bool,
        hide_on_tablet: bool,
        hide_on_desktop: bool,
        custom_classes: Option<&str>,
    ) -> String {
        let custom = custom_classes.filter(|value| !value.trim().is_empty());
        [
            hide_on_mobile.then_some(self.mobile.as_str()),
            hide_on_tablet.then_some(self.tablet.as_str()),
            hide_on_desktop.then_some(self.desktop.as_str()),
            custom,
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// Compose visibility classes using the default breakpoint fragments.
pub fn visibility_classes(
    hide_on_mobile: bool,
    hide_on_tablet: bool,
    hide_on_desktop: bool,
    custom_classes: Option<&str>,
) -> String {
    VisibilityClasses::default().classes(
        hide_on_mobile,
        hide_on_tablet,
        hide_on_desktop,
        custom_classes,
    )
}
