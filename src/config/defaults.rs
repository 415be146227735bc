//! Shipped default lexicon and pattern tables.
//!
//! Centralises the rule data the pipeline ships with. Grouped by stage for
//! easy discovery. Every table here can be replaced from `triage_config.toml`.

// ============================================================================
// Classifier lexicon (keyword, weight)
// ============================================================================

pub const BUG_KEYWORDS: &[(&str, f64)] = &[
    ("crash", 0.9),
    ("bug", 0.9),
    ("error", 0.85),
    ("broken", 0.85),
    ("not working", 0.8),
    ("fail", 0.8),
    ("freeze", 0.75),
    ("stuck", 0.7),
    ("glitch", 0.8),
    ("issue", 0.5),
    ("problem", 0.6),
    ("fix", 0.5),
    ("won't load", 0.8),
    ("can't open", 0.75),
    ("slow", 0.4),
    ("unresponsive", 0.7),
    ("black screen", 0.8),
    ("force close", 0.85),
    ("data loss", 0.9),
    ("lost my", 0.7),
    ("disappeared", 0.7),
    ("login fail", 0.8),
    ("sync", 0.5),
    ("update broke", 0.85),
];

pub const FEATURE_REQUEST_KEYWORDS: &[(&str, f64)] = &[
    ("add", 0.6),
    ("feature", 0.8),
    ("wish", 0.7),
    ("would be nice", 0.8),
    ("suggestion", 0.8),
    ("please include", 0.8),
    ("should have", 0.7),
    ("need", 0.5),
    ("want", 0.5),
    ("improve", 0.5),
    ("could you", 0.6),
    ("it would help", 0.75),
    ("missing", 0.4),
    ("request", 0.7),
    ("dark mode", 0.85),
    ("integration", 0.6),
    ("support for", 0.7),
    ("option to", 0.7),
    ("ability to", 0.7),
    ("allow", 0.5),
];

pub const PRAISE_KEYWORDS: &[(&str, f64)] = &[
    ("love", 0.8),
    ("great", 0.7),
    ("awesome", 0.8),
    ("excellent", 0.85),
    ("amazing", 0.85),
    ("best", 0.7),
    ("perfect", 0.8),
    ("fantastic", 0.85),
    ("wonderful", 0.8),
    ("thank", 0.6),
    ("good job", 0.8),
    ("well done", 0.8),
    ("helpful", 0.6),
    ("recommend", 0.7),
    ("five stars", 0.9),
    ("5 stars", 0.9),
    ("intuitive", 0.7),
    ("beautiful", 0.7),
    ("smooth", 0.6),
    ("impressed", 0.8),
];

pub const COMPLAINT_KEYWORDS: &[(&str, f64)] = &[
    ("terrible", 0.85),
    ("worst", 0.85),
    ("hate", 0.8),
    ("awful", 0.85),
    ("horrible", 0.85),
    ("disappointed", 0.8),
    ("frustrating", 0.8),
    ("annoying", 0.7),
    ("waste", 0.7),
    ("useless", 0.8),
    ("poor", 0.6),
    ("bad", 0.6),
    ("unacceptable", 0.85),
    ("ridiculous", 0.7),
    ("overpriced", 0.7),
    ("scam", 0.8),
    ("regret", 0.75),
    ("misleading", 0.7),
    ("uninstall", 0.7),
    ("refund", 0.8),
    ("angry", 0.75),
    ("furious", 0.85),
];

pub const SPAM_KEYWORDS: &[(&str, f64)] = &[
    ("click here", 0.9),
    ("free money", 0.95),
    ("buy now", 0.9),
    ("limited offer", 0.85),
    ("act now", 0.85),
    ("winner", 0.8),
    ("congratulations", 0.7),
    ("earn money", 0.9),
    ("discount code", 0.8),
    ("subscribe", 0.5),
    ("visit my", 0.85),
    ("check out my", 0.8),
    ("http://", 0.6),
    ("www.", 0.5),
    ("promo", 0.7),
    ("casino", 0.9),
    ("lottery", 0.9),
    ("viagra", 0.95),
];

// ============================================================================
// Bug extraction
// ============================================================================

pub const SEVERITY_CRITICAL: &[&str] = &[
    "crash",
    "data loss",
    "lost my",
    "disappeared",
    "corrupt",
    "black screen",
    "force close",
    "bricked",
    "won't start",
];

pub const SEVERITY_HIGH: &[&str] = &[
    "login",
    "can't access",
    "sync",
    "payment",
    "security",
    "authentication",
    "password",
    "account locked",
    "not loading",
];

pub const SEVERITY_MEDIUM: &[&str] = &[
    "slow",
    "lag",
    "delay",
    "minor",
    "cosmetic",
    "alignment",
    "typo",
    "formatting",
    "color",
    "font",
];

/// Ships empty; operators may move keywords here to mark low-severity bugs.
pub const SEVERITY_LOW: &[&str] = &[];

/// Device patterns; capture group 1 (or the whole match) becomes the device.
pub const DEVICE_PATTERNS: &[&str] = &[
    r"(?i)\b(iPhone\s?(?:\d{1,2}|SE|X[RS]?)(?:\s?(?:Pro Max|Pro|Plus|Max|Mini))?)",
    r"(?i)\b(iPad(?:\s?(?:Pro|Air|Mini))?(?:\s?\d{1,2})?)",
    r"(?i)\b(Pixel\s?\d{1,2}(?:\s?(?:Pro|XL|a))?)",
    r"(?i)\b((?:Samsung\s)?Galaxy\s?[A-Z]?\d{1,3}(?:\s?(?:Ultra|Plus|FE))?)",
    r"(?i)\b(OnePlus\s?\d{1,2}[A-Z]?)",
    r"(?i)\b((?:Xiaomi|Redmi)\s?[A-Za-z]*\s?\d{1,2}[A-Za-z]?)",
    r"(?i)\b(Huawei\s?[A-Z]+\s?\d{1,2})",
    r"(?i)\b(MacBook(?:\s?(?:Pro|Air))?)",
    r"(?i)\b(Samsung|Chromebook)\b",
];

pub const OS_PATTERNS: &[&str] = &[
    r"(?i)\b(iPadOS\s?\d+(?:\.\d+)*)",
    r"(?i)\b(iOS\s?\d+(?:\.\d+)*)",
    r"(?i)\b(Android\s?\d+(?:\.\d+)*)",
    r"(?i)\b(macOS\s?(?:\d+(?:\.\d+)*|[A-Z][a-z]+))",
    r"(?i)\b(Windows\s?\d+)",
    r"(?i)\b(Chrome\s?OS)\b",
];

pub const VERSION_PATTERNS: &[&str] = &[
    r"(?i)\bv(\d+\.\d+(?:\.\d+)?)\b",
    r"(?i)\bversion\s*(\d+\.\d+(?:\.\d+)?)",
    r"\b(\d+\.\d+\.\d+)\b",
];

/// Ordinal and sequencing cues marking a reproduction sentence
pub const REPRO_CUES: &[&str] = &[
    "first",
    "then",
    "steps",
    "step",
    "next",
    "after",
    "finally",
    "every time",
    "whenever",
    "when i",
];

// ============================================================================
// Feature extraction
// ============================================================================

/// Feature themes in declaration (tie-break) order
pub const FEATURE_THEMES: &[(&str, &[&str])] = &[
    ("dark mode", &["dark mode", "night mode", "dark theme"]),
    ("offline mode", &["offline", "without internet", "no connection"]),
    ("integration", &["integration", "integrate", "api", "connect with"]),
    ("export", &["export", "download", "csv", "json", "pdf export"]),
    ("accessibility", &["accessibility", "screen reader", "contrast", "wcag"]),
    ("admin controls", &["admin", "role", "permission", "sso", "rbac"]),
    ("time tracking", &["time tracking", "timer", "pomodoro", "time spent"]),
    ("customization", &["customize", "custom", "widget", "layout", "theme"]),
    ("encryption", &["encryption", "encrypt", "end-to-end", "e2ee", "security"]),
    ("collaboration", &["collaboration", "team", "shared", "real-time"]),
    ("pricing", &["discount", "pricing", "educational", "bulk", "license"]),
    ("notifications", &["notification", "alert", "reminder"]),
];

/// Phrases that introduce the actual request in a feature message
pub const REQUEST_CUES: &[&str] = &[
    "would love",
    "please",
    "wish",
    "need",
    "want",
    "add",
    "include",
    "support",
    "implement",
    "suggestion:",
];

/// Theme label used when no theme keyword matched
pub const GENERAL_THEME: &str = "General";

/// Minimum length for a request summary to be kept
pub const MIN_REQUEST_SUMMARY_CHARS: usize = 15;

/// Maximum request summary length
pub const MAX_REQUEST_SUMMARY_CHARS: usize = 200;
