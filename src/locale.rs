//! Locale identifiers and locale-change notification.

use crate::consts::{
    DEFAULT_LOCALE, HOST_TAG_SEPARATOR, REFERENCE_YEAR, SAMPLE_DAY, SAMPLE_MONTH, TAG_SEPARATOR,
};
use crate::format::FieldLayout;
use crate::prelude::*;
use chrono::NaiveDate;
use icu_locale::LocaleExpander;
use icu_locale_core::LanguageIdentifier;
use icu_locale_core::subtags::{Language, Script, language, script};
use pure_rust_locales::locale_match;
use std::fmt;

/// Language subtags that are common mistakes for a real one
const LANGUAGE_ALIASES: &[(Language, Language)] = &[(language!("jp"), language!("ja"))];

/// Host locale modifiers that select a non-default script (`sr_RS@latin`)
const SCRIPT_MODIFIERS: &[(Script, &str)] = &[
    (script!("Latn"), "latin"),
    (script!("Cyrl"), "cyrillic"),
    (script!("Deva"), "devanagari"),
];

/// A locale tag (`en-US`, `ja_JP`, `de`) resolved against the host locale
/// database.
///
/// Tags the host doesn't know resolve to the POSIX locale. The original tag
/// is kept and is what `Display` prints.
#[derive(Debug, Clone, Display)]
#[display(fmt = "{tag}")]
pub struct Locale {
    tag:          String,
    host:         chrono::Locale,
    layout:       FieldLayout,
    fallback:     bool,
    /// Nominative month names, where the host's `%B` is a genitive form
    months:       Option<&'static [&'static str]>,
    short_months: Option<&'static [&'static str]>,
}

impl Locale {
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        let (host, fallback) = match resolve(&tag) {
            Some(host) => (host, false),
            None => {
                log::warn!("Unknown locale {tag:?}, falling back to POSIX");
                (chrono::Locale::POSIX, true)
            }
        };
        let layout = sample_layout(host).unwrap_or_default();
        let layout = match locale_match!(host => LC_TIME::DATE_FMT) {
            Some(pattern) => layout.with_marks(pattern),
            None => layout,
        };
        Self {
            tag,
            host,
            layout,
            fallback,
            months: locale_match!(host => LC_TIME::ALT_MON),
            short_months: locale_match!(host => LC_TIME::AB_ALT_MON),
        }
    }

    /// The tag this locale was created from
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// True if the tag wasn't recognized and POSIX conventions are used instead
    pub const fn is_fallback(&self) -> bool {
        self.fallback
    }

    pub(crate) const fn host(&self) -> chrono::Locale {
        self.host
    }

    pub(crate) const fn layout(&self) -> &FieldLayout {
        &self.layout
    }

    /// Month names to use when no day is shown, if they differ from `%B`
    pub(crate) const fn standalone_months(&self) -> Option<&'static [&'static str]> {
        self.months
    }

    /// Abbreviated month names to use when no day is shown
    pub(crate) const fn standalone_short_months(&self) -> Option<&'static [&'static str]> {
        self.short_months
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}

impl PartialEq for Locale {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
    }
}

impl Eq for Locale {}

impl From<&str> for Locale {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for Locale {
    fn from(tag: String) -> Self {
        Self::new(tag)
    }
}

/// Maps a BCP-47 tag onto the host locale database.
///
/// Missing subtags are filled in from likely-subtags data, so `de` is
/// `de_DE` and `zh-Hant` is `zh_TW`. A script that isn't the default for the
/// language selects a host modifier (`sr-Latn-RS` is `sr_RS@latin`).
fn resolve(tag: &str) -> Option<chrono::Locale> {
    let tag = tag.trim();
    if let Ok(host) = chrono::Locale::try_from(tag) {
        return Some(host);
    }
    let normalized = tag.replace(HOST_TAG_SEPARATOR, &TAG_SEPARATOR.to_string());
    let mut requested = icu_locale_core::Locale::try_from_str(&normalized).ok()?.id;
    if requested.language.is_unknown() {
        return None;
    }
    if let Some((_, target)) = LANGUAGE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == requested.language)
    {
        requested.language = *target;
    }

    let expander = LocaleExpander::new_extended();
    let likely = |script: Option<Script>, region| {
        let mut id = LanguageIdentifier::from((requested.language, script, region));
        expander.maximize(&mut id);
        id
    };
    let default = likely(None, requested.region);
    // zh-Hant has no host modifier; the script picks the region instead
    let scripted = requested
        .script
        .and_then(|script| likely(Some(script), None).region);
    let modifier = requested
        .script
        .filter(|script| Some(*script) != default.script)
        .and_then(|script| {
            SCRIPT_MODIFIERS
                .iter()
                .find(|(known, _)| *known == script)
                .map(|(_, modifier)| *modifier)
        });

    let language = requested.language.as_str();
    [requested.region, scripted, default.region, likely(None, None).region]
        .into_iter()
        .flatten()
        .flat_map(|region| {
            let name = format!("{language}{HOST_TAG_SEPARATOR}{}", region.as_str());
            [modifier.map(|modifier| format!("{name}@{modifier}")), Some(name)]
        })
        .flatten()
        .find_map(|name| chrono::Locale::try_from(name.as_str()).ok())
}

fn sample_layout(host: chrono::Locale) -> Option<FieldLayout> {
    let sample = NaiveDate::from_ymd_opt(REFERENCE_YEAR, SAMPLE_MONTH, SAMPLE_DAY)?
        .and_hms_opt(0, 0, 0)?
        .and_utc()
        .format_localized("%x", host)
        .to_string();
    FieldLayout::from_sample(&sample)
}

/// Handle returned by [`LocaleChanges::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Listener = Box<dyn FnMut()>;

/// Synchronous locale-change broadcast.
///
/// Listeners run in registration order, once per change, with no payload.
/// A listener added after a change doesn't see it. Callers that would rather
/// poll can compare [`version`](Self::version) values.
#[derive(Default)]
pub struct LocaleChanges {
    listeners: Vec<(Subscription, Listener)>,
    next_id:   u64,
    version:   u64,
}

impl LocaleChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut() + 'static) -> Subscription {
        let subscription = Subscription(self.next_id);
        self.next_id += 1;
        self.listeners.push((subscription, Box::new(listener)));
        subscription
    }

    /// Removes a listener. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(s, _)| *s != subscription);
        self.listeners.len() != before
    }

    /// Number of changes broadcast so far
    pub const fn version(&self) -> u64 {
        self.version
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn notify(&mut self) {
        self.version = self.version.wrapping_add(1);
        log::debug!(
            "Locale changed (version {}), notifying {} listener(s)",
            self.version,
            self.listeners.len()
        );
        for (_, listener) in &mut self.listeners {
            listener();
        }
    }
}

impl fmt::Debug for LocaleChanges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocaleChanges")
            .field("listeners", &self.listeners.len())
            .field("version", &self.version)
            .finish()
    }
}

/// The adapter-wide locale together with its change channel.
#[derive(Debug)]
pub struct LocaleState<L> {
    locale:  L,
    changes: LocaleChanges,
}

impl<L> LocaleState<L> {
    pub fn new(locale: L) -> Self {
        Self {
            locale,
            changes: LocaleChanges::new(),
        }
    }

    pub const fn locale(&self) -> &L {
        &self.locale
    }

    /// Replaces the locale and broadcasts exactly one change.
    pub fn replace(&mut self, locale: L) {
        self.locale = locale;
        self.changes.notify();
    }

    pub const fn changes(&self) -> &LocaleChanges {
        &self.changes
    }

    pub fn changes_mut(&mut self) -> &mut LocaleChanges {
        &mut self.changes
    }
}
