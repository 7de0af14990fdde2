//! Command taxonomy for intercepted WebDriver calls.
//!
//! Every recognized driver operation is a [`Command`] variant. Each variant
//! carries the [`CapabilityGroup`] it is called through and a short mnemonic
//! (the method name). The long form is the call expression a test author
//! would have written, e.g. `webDriver.manage().timeouts().implicitlyWait`.
//!
//! Several mnemonics are shared: `sendKeys` exists for elements, the keyboard
//! and alerts; `getSize` exists for windows and elements. The variant, not
//! the mnemonic, is the identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::result::{DriverTraceError, DriverTraceResult};

/// Default subject name for element commands
pub const DEFAULT_ELEMENT_SUBJECT: &str = "webElement";

/// Default subject name for every other command
pub const DEFAULT_DRIVER_SUBJECT: &str = "webDriver";

/// Driver sub-interface a command is invoked through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapabilityGroup {
    /// Called directly on the driver
    Driver,
    /// Driver cast to a script executor
    ScriptExecutor,
    /// Driver cast to a screenshot taker
    ScreenshotCapable,
    /// `manage()`
    Options,
    /// `manage().ime()`
    ImeHandler,
    /// `navigate()`
    Navigation,
    /// `switchTo()`
    TargetLocator,
    /// `manage().timeouts()`
    Timeouts,
    /// `manage().window()`
    Window,
    /// `switchTo().alert()`
    Alert,
    /// Called directly on an element
    Element,
    /// `getKeyboard()`
    Keyboard,
    /// `getMouse()`
    Mouse,
}

impl CapabilityGroup {
    /// All groups, in declaration order
    pub const ALL: [Self; 13] = [
        Self::Driver,
        Self::ScriptExecutor,
        Self::ScreenshotCapable,
        Self::Options,
        Self::ImeHandler,
        Self::Navigation,
        Self::TargetLocator,
        Self::Timeouts,
        Self::Window,
        Self::Alert,
        Self::Element,
        Self::Keyboard,
        Self::Mouse,
    ];

    /// Group name as written in the taxonomy
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Driver => "Driver",
            Self::ScriptExecutor => "ScriptExecutor",
            Self::ScreenshotCapable => "ScreenshotCapable",
            Self::Options => "Options",
            Self::ImeHandler => "ImeHandler",
            Self::Navigation => "Navigation",
            Self::TargetLocator => "TargetLocator",
            Self::Timeouts => "Timeouts",
            Self::Window => "Window",
            Self::Alert => "Alert",
            Self::Element => "Element",
            Self::Keyboard => "Keyboard",
            Self::Mouse => "Mouse",
        }
    }

    /// Subject name used when the caller does not supply one
    #[must_use]
    pub const fn default_subject(self) -> &'static str {
        match self {
            Self::Element => DEFAULT_ELEMENT_SUBJECT,
            _ => DEFAULT_DRIVER_SUBJECT,
        }
    }

    /// Render `subject` calling `mnemonic` through this group.
    ///
    /// This is the single rendering table for the whole taxonomy.
    #[must_use]
    pub fn render(self, subject: &str, mnemonic: &str) -> String {
        match self {
            Self::Driver | Self::Element => format!("{subject}.{mnemonic}"),
            Self::ScriptExecutor => format!("(ScriptExecutor) {subject}.{mnemonic}"),
            Self::ScreenshotCapable => format!("(ScreenshotCapable) {subject}.{mnemonic}"),
            Self::Options => format!("{subject}.manage().{mnemonic}"),
            Self::ImeHandler => format!("{subject}.manage().ime().{mnemonic}"),
            Self::Navigation => format!("{subject}.navigate().{mnemonic}"),
            Self::TargetLocator => format!("{subject}.switchTo().{mnemonic}"),
            Self::Timeouts => format!("{subject}.manage().timeouts().{mnemonic}"),
            Self::Window => format!("{subject}.manage().window().{mnemonic}"),
            Self::Alert => format!("{subject}.switchTo().alert().{mnemonic}"),
            Self::Keyboard => format!("{subject}.getKeyboard().{mnemonic}"),
            Self::Mouse => format!("{subject}.getMouse().{mnemonic}"),
        }
    }
}

impl fmt::Display for CapabilityGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CapabilityGroup {
    type Err = DriverTraceError;

    fn from_str(s: &str) -> DriverTraceResult<Self> {
        Self::ALL
            .into_iter()
            .find(|group| group.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| DriverTraceError::UnknownGroup {
                name: s.to_string(),
            })
    }
}

macro_rules! commands {
    ($( $(#[$meta:meta])* $variant:ident => ($group:ident, $name:literal, $short:literal), )+) => {
        /// A recognized driver operation
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum Command {
            $( $(#[$meta])* $variant, )+
        }

        impl Command {
            /// Every command, in taxonomy order
            pub const ALL: &'static [Self] = &[ $( Self::$variant, )+ ];

            /// Capability group the command is called through
            #[must_use]
            pub const fn group(self) -> CapabilityGroup {
                match self {
                    $( Self::$variant => CapabilityGroup::$group, )+
                }
            }

            /// Method name, e.g. `findElement`
            #[must_use]
            pub const fn short_name(self) -> &'static str {
                match self {
                    $( Self::$variant => $short, )+
                }
            }

            /// Unique identifier of the command, e.g. `findElementByWebDriver`
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => $name, )+
                }
            }
        }
    };
}

commands! {
    // driver
    /// `close`
    Close => (Driver, "close", "close"),
    /// `findElement` on the driver
    FindElementByWebDriver => (Driver, "findElementByWebDriver", "findElement"),
    /// `findElements` on the driver
    FindElementsByWebDriver => (Driver, "findElementsByWebDriver", "findElements"),
    /// `get`
    Get => (Driver, "get", "get"),
    /// `getCurrentUrl`
    GetCurrentUrl => (Driver, "getCurrentUrl", "getCurrentUrl"),
    /// `getPageSource`
    GetPageSource => (Driver, "getPageSource", "getPageSource"),
    /// `getTitle`
    GetTitle => (Driver, "getTitle", "getTitle"),
    /// `getWindowHandle`
    GetWindowHandle => (Driver, "getWindowHandle", "getWindowHandle"),
    /// `getWindowHandles`
    GetWindowHandles => (Driver, "getWindowHandles", "getWindowHandles"),
    /// `quit`
    Quit => (Driver, "quit", "quit"),

    // script executor
    /// `executeAsyncScript`
    ExecuteAsyncScript => (ScriptExecutor, "executeAsyncScript", "executeAsyncScript"),
    /// `executeScript`
    ExecuteScript => (ScriptExecutor, "executeScript", "executeScript"),

    // screenshot
    /// `getScreenshotAs` on the driver
    GetScreenshotAs => (ScreenshotCapable, "getScreenshotAs", "getScreenshotAs"),

    // options
    /// `addCookie`
    AddCookie => (Options, "addCookie", "addCookie"),
    /// `deleteCookieNamed`
    DeleteCookieNamed => (Options, "deleteCookieNamed", "deleteCookieNamed"),
    /// `deleteCookie`
    DeleteCookie => (Options, "deleteCookie", "deleteCookie"),
    /// `deleteAllCookies`
    DeleteAllCookies => (Options, "deleteAllCookies", "deleteAllCookies"),
    /// `getCookies`
    GetCookies => (Options, "getCookies", "getCookies"),
    /// `getCookieNamed`
    GetCookieNamed => (Options, "getCookieNamed", "getCookieNamed"),

    // input method engines
    /// `getAvailableEngines`
    GetAvailableEngines => (ImeHandler, "getAvailableEngines", "getAvailableEngines"),
    /// `getActiveEngine`
    GetActiveEngine => (ImeHandler, "getActiveEngine", "getActiveEngine"),
    /// `isActivated`
    IsActivated => (ImeHandler, "isActivated", "isActivated"),
    /// `deactivate`
    Deactivate => (ImeHandler, "deactivate", "deactivate"),
    /// `activateEngine`
    ActivateEngine => (ImeHandler, "activateEngine", "activateEngine"),

    // timeouts
    /// `implicitlyWait`
    ImplicitlyWait => (Timeouts, "implicitlyWait", "implicitlyWait"),
    /// `pageLoadTimeout`
    PageLoadTimeout => (Timeouts, "pageLoadTimeout", "pageLoadTimeout"),
    /// `setScriptTimeout`
    SetScriptTimeout => (Timeouts, "setScriptTimeout", "setScriptTimeout"),

    // navigation
    /// `back`
    Back => (Navigation, "back", "back"),
    /// `forward`
    Forward => (Navigation, "forward", "forward"),
    /// `refresh`
    Refresh => (Navigation, "refresh", "refresh"),
    /// `to`
    To => (Navigation, "to", "to"),

    // target locator
    /// `activeElement`
    ActiveElement => (TargetLocator, "activeElement", "activeElement"),
    /// `defaultContent`
    DefaultContent => (TargetLocator, "defaultContent", "defaultContent"),
    /// `frame(int)`
    FrameByIndex => (TargetLocator, "frameByIndex", "frame"),
    /// `frame(WebElement)`
    FrameByElement => (TargetLocator, "frameByElement", "frame"),
    /// `parentFrame`
    ParentFrame => (TargetLocator, "parentFrame", "parentFrame"),
    /// `window`
    Window => (TargetLocator, "window", "window"),

    // window
    /// `fullscreen`
    Fullscreen => (Window, "fullscreen", "fullscreen"),
    /// `getPosition`
    GetPosition => (Window, "getPosition", "getPosition"),
    /// `getSize` on the window
    GetSizeByWindow => (Window, "getSizeByWindow", "getSize"),
    /// `maximize`
    Maximize => (Window, "maximize", "maximize"),
    /// `setPosition`
    SetPosition => (Window, "setPosition", "setPosition"),
    /// `setSize` on the window
    SetSizeByWindow => (Window, "setSizeByWindow", "setSize"),

    // alert
    /// `dismiss`
    Dismiss => (Alert, "dismiss", "dismiss"),
    /// `accept`
    Accept => (Alert, "accept", "accept"),
    /// `getText` on an alert
    GetTextByAlert => (Alert, "getTextByAlert", "getText"),
    /// `sendKeys` on an alert
    SendKeysByAlert => (Alert, "sendKeysByAlert", "sendKeys"),

    // element
    /// `click` on an element
    ClickByElement => (Element, "clickByElement", "click"),
    /// `clear`
    Clear => (Element, "clear", "clear"),
    /// `findElement` on an element
    FindElementByElement => (Element, "findElementByElement", "findElement"),
    /// `findElements` on an element
    FindElementsByElement => (Element, "findElementsByElement", "findElements"),
    /// `getAttribute`
    GetAttribute => (Element, "getAttribute", "getAttribute"),
    /// `getCoordinates`
    GetCoordinates => (Element, "getCoordinates", "getCoordinates"),
    /// `getCssValue`
    GetCssValue => (Element, "getCssValue", "getCssValue"),
    /// `getScreenshotAs` on an element
    GetScreenshotAsByElement => (Element, "getScreenshotAsByElement", "getScreenshotAs"),
    /// `getTagName`
    GetTagName => (Element, "getTagName", "getTagName"),
    /// `getText` on an element
    GetText => (Element, "getText", "getText"),
    /// `isDisplayed`
    IsDisplayed => (Element, "isDisplayed", "isDisplayed"),
    /// `isEnabled`
    IsEnabled => (Element, "isEnabled", "isEnabled"),
    /// `isSelected`
    IsSelected => (Element, "isSelected", "isSelected"),
    /// `getLocation`
    GetLocation => (Element, "getLocation", "getLocation"),
    /// `getSize` on an element
    GetSizeByElement => (Element, "getSizeByElement", "getSize"),
    /// `getRect`
    GetRect => (Element, "getRect", "getRect"),
    /// `sendKeys` on an element
    SendKeysByElement => (Element, "sendKeysByElement", "sendKeys"),
    /// `sendKeys` with a file path on a file input
    UploadFile => (Element, "uploadFile", "sendKeys"),
    /// `submit`
    Submit => (Element, "submit", "submit"),

    // keyboard
    /// `sendKeys` on the keyboard
    SendKeysByKeyboard => (Keyboard, "sendKeysByKeyboard", "sendKeys"),
    /// `pressKey`
    PressKey => (Keyboard, "pressKey", "pressKey"),
    /// `releaseKey`
    ReleaseKey => (Keyboard, "releaseKey", "releaseKey"),

    // mouse
    /// `click` on the mouse
    ClickByMouse => (Mouse, "clickByMouse", "click"),
    /// `doubleClick`
    DoubleClick => (Mouse, "doubleClick", "doubleClick"),
    /// `mouseDown`
    MouseDown => (Mouse, "mouseDown", "mouseDown"),
    /// `mouseUp`
    MouseUp => (Mouse, "mouseUp", "mouseUp"),
    /// `mouseMove` to an element
    MouseMove => (Mouse, "mouseMove", "mouseMove"),
    /// `mouseMove` to an element with offset
    MouseMoveWithOffset => (Mouse, "mouseMoveWithOffset", "mouseMove"),
    /// `contextClick`
    ContextClick => (Mouse, "contextClick", "contextClick"),
}

impl Command {
    /// Long form using the group's default subject name
    #[must_use]
    pub fn long_form(self) -> String {
        self.long_form_with(self.group().default_subject())
    }

    /// Long form with an explicit subject name
    #[must_use]
    pub fn long_form_with(self, subject: &str) -> String {
        self.group().render(subject, self.short_name())
    }

    /// All commands of `group` whose mnemonic is `mnemonic`.
    ///
    /// More than one command comes back when the same method has several
    /// call shapes, e.g. `(Element, "sendKeys")`.
    #[must_use]
    pub fn lookup(group: CapabilityGroup, mnemonic: &str) -> Vec<Self> {
        Self::ALL
            .iter()
            .copied()
            .filter(|cmd| cmd.group() == group && cmd.short_name() == mnemonic)
            .collect()
    }

    /// All commands of `group`
    pub fn in_group(group: CapabilityGroup) -> impl Iterator<Item = Self> {
        Self::ALL.iter().copied().filter(move |cmd| cmd.group() == group)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Command {
    type Err = DriverTraceError;

    fn from_str(s: &str) -> DriverTraceResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|cmd| cmd.name() == s)
            .ok_or_else(|| DriverTraceError::UnknownCommand {
                name: s.to_string(),
            })
    }
}
