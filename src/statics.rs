// Central place for UI strings and other non-localized constants.
// Keep these out of gui.rs to reduce duplication and make tweaks safer.

// English UI strings (EN_ prefix to make future localization easier)
pub const EN_APP_TITLE: &str = "SCUM parameters.json Editor";

pub const EN_BTN_OPEN: &str = "Open...";
pub const EN_BTN_SAVE: &str = "Save";
pub const EN_BTN_SAVE_AS: &str = "Save As...";
pub const EN_BTN_TOGGLE_THEME: &str = "Theme";

pub const EN_LABEL_FIND_ID: &str = "Find ID:";
pub const EN_HINT_FIND_ID: &str = "e.g. Wolf";
pub const EN_BTN_PREVIOUS: &str = "Previous";
pub const EN_BTN_NEXT: &str = "Next";

pub const EN_HOME_HEADING: &str = "SCUM parameters.json Editor";
pub const EN_HOME_INSTRUCTIONS: &str = "Open a parameters.json file to begin.";
pub const EN_NO_PARAMETERS: &str = "This document has no \"Parameters\" list.";

pub const EN_WINDOW_EDIT_VALUE: &str = "Edit Value";
pub const EN_PREFIX_EDIT: &str = "Edit";
pub const EN_LABEL_NEW_VALUE: &str = "Enter new value:";

pub const EN_BTN_OK: &str = "OK";
pub const EN_BTN_CANCEL: &str = "Cancel";
pub const EN_BTN_CLEAR: &str = "Clear";

pub const EN_BADGE_DIRTY: &str = "modified";
pub const EN_FILE_FILTER_JSON: &str = "JSON files";
pub const EN_FILE_FILTER_ALL: &str = "All files";

// Newline constants (used for save formatting; keep out of document/value code).
pub const NL_LF: &str = "\n";
pub const NL_CRLF: &str = "\r\n";

// Default window geometry when nothing is stored in settings.
pub const DEFAULT_WINDOW_SIZE: [f32; 2] = [1200.0, 800.0];
pub const FIND_ID_MAX_CHARS: usize = 50;
// Stable egui id so resized column widths are restored from eframe storage.
pub const TABLE_ID_SALT: &str = "parameters_table";

// Settings file location.
pub const SETTINGS_DIR_NAME: &str = "params-editor";
pub const SETTINGS_FILE_NAME: &str = "settings.json";

// Parameters document keys (P_ prefix).
pub const P_PARAMETERS: &str = "Parameters";

pub const P_FIELD_ID: &str = "Id";
pub const P_FIELD_IS_DISABLED_FOR_SPAWNING: &str = "IsDisabledForSpawning";
pub const P_FIELD_ALLOWED_LOCATIONS: &str = "AllowedLocations";
pub const P_FIELD_COOLDOWN_MIN: &str = "CooldownPerSquadMemberMin";
pub const P_FIELD_COOLDOWN_MAX: &str = "CooldownPerSquadMemberMax";
pub const P_FIELD_COOLDOWN_GROUP: &str = "CooldownGroup";
pub const P_FIELD_VARIATIONS: &str = "Variations";
pub const P_FIELD_SHOULD_OVERRIDE_USAGE: &str = "ShouldOverrideInitialAndRandomUsage";
pub const P_FIELD_INITIAL_USAGE_OVERRIDE: &str = "InitialUsageOverride";
pub const P_FIELD_RANDOM_USAGE_OVERRIDE: &str = "RandomUsageOverrideUsage";

// Display literals for boolean cells.
pub const LIT_TRUE: &str = "true";
pub const LIT_FALSE: &str = "false";
