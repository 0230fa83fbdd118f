/// Maximum number of slider stops the theme editor renders for a range setting.
pub const MAX_RANGE_STEPS: u32 = 101;

/// Step used when a range setting omits `step`.
pub const DEFAULT_RANGE_STEP: f64 = 1.0;

/// Tolerance when deciding whether a floating step count is a whole number.
pub const STEP_EPSILON: f64 = 1e-9;

pub const DEFAULT_CONFIG_FILE: &str = ".schemalint.toml";

pub const BUILTIN_VOCABULARY_VERSION: &str = "2025-01";

/// Input and sidebar setting types accepted by the theme editor.
pub const BUILTIN_SETTING_TYPES: &[&str] = &[
    // basic inputs
    "checkbox",
    "number",
    "radio",
    "range",
    "select",
    "text",
    "textarea",
    // specialized inputs
    "article",
    "article_list",
    "blog",
    "collection",
    "collection_list",
    "color",
    "color_background",
    "color_scheme",
    "color_scheme_group",
    "font_picker",
    "html",
    "image_picker",
    "inline_richtext",
    "link_list",
    "liquid",
    "metaobject",
    "metaobject_list",
    "page",
    "product",
    "product_list",
    "richtext",
    "text_alignment",
    "url",
    "video",
    "video_url",
    // sidebar
    "header",
    "paragraph",
];

/// Reserved block types. Custom block names are free-form and not listed here.
pub const BUILTIN_BLOCK_TYPES: &[&str] = &["@app", "@theme"];

/// Setting types that only decorate the editor sidebar and carry no value.
pub const SIDEBAR_SETTING_TYPES: &[&str] = &["header", "paragraph"];

pub const DEFAULT_EXTENSIONS: &[&str] = &["liquid"];

pub const DEFAULT_EXCLUDES: &[&str] = &["node_modules", ".git"];

/// File names that are layouts regardless of directory.
pub const LAYOUT_FILE_NAMES: &[&str] = &["theme.liquid", "checkout.liquid", "gift_card.liquid"];
