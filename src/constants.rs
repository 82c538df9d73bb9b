//! Global Constants
//!
//! Centralized constants for limits, markers and wire formats.
//! All magic numbers should be defined here with documentation.

/// Wiki REST API constants
pub mod wiki {
    /// Content endpoint, relative to the wiki base URL
    pub const CONTENT_PATH: &str = "rest/api/content";

    /// Query suffix that embeds the storage-format body
    pub const EXPAND_BODY_STORAGE: &str = "expand=body.storage";

    /// Path segment marking a short link (`/x/<token>`)
    pub const SHORT_LINK_SPACE: &str = "x";

    /// Path segment expected before `<space>/<title>` in display links
    pub const DISPLAY_SEGMENT: &str = "display";

    /// Query key of a direct page id link
    pub const PAGE_ID_KEY: &str = "pageId";

    /// Query keys of a title + space key link
    pub const TITLE_KEY: &str = "title";
    pub const SPACE_KEY_KEY: &str = "spaceKey";
}

/// Short-link decoding constants
pub mod short_link {
    /// Tokens are right-padded to this width before decoding
    pub const PADDED_WIDTH: usize = 11;

    /// Padding character
    pub const FILLER: char = 'A';

    /// Decoded byte width (one little-endian u64)
    pub const DECODED_BYTES: usize = 8;
}

/// Storage-format markup used by the flattening engine
pub mod markup {
    /// Macro element wrapping expandable sections
    pub const MACRO_TAG: &str = "ac:structured-macro";

    /// Macro parameter element
    pub const PARAMETER_TAG: &str = "ac:parameter";

    /// Attribute holding macro and parameter names
    pub const NAME_ATTR: &str = "ac:name";

    /// Macro name of an expandable section
    pub const EXPAND_MACRO: &str = "ui-expand";

    /// Parameter name holding the section title
    pub const TITLE_PARAM: &str = "title";

    /// Class of generic content wrappers inside cells
    pub const CONTENT_WRAPPER_CLASS: &str = "content-wrapper";
}

/// Flattening engine limits
pub mod extract {
    /// Cell children are dispatched at depth 0; wrappers add one level
    pub const MAX_CELL_DEPTH: usize = 1;

    /// Expandable sections nest at most one level below their parent
    pub const MAX_SECTION_DEPTH: usize = 1;

    /// Synthetic column carrying the section label
    pub const SECTION_COLUMN: &str = "Section";

    /// Summary sheet columns
    pub const SUMMARY_HEADER_COLUMN: &str = "Header";
    pub const SUMMARY_DESCRIPTION_COLUMN: &str = "Description";
}

/// Spreadsheet naming limits
pub mod sheet {
    /// Excel's hard limit on worksheet name length
    pub const MAX_NAME_CHARS: usize = 31;

    /// Prefix kept before a collision suffix
    pub const SUFFIX_PREFIX_CHARS: usize = 28;

    /// Characters Excel rejects in worksheet names
    pub const ILLEGAL_CHARS_PATTERN: &str = r"[\[\]:*?\\/]";

    /// Name used when a label is blank after cleanup
    pub const FALLBACK_NAME: &str = "Section";

    /// First sheet of every page workbook
    pub const SUMMARY_SHEET: &str = "Summary";

    /// Excel's limit on characters in one cell
    pub const MAX_CELL_CHARS: usize = 32_767;

    /// Output workbook extension
    pub const WORKBOOK_EXTENSION: &str = "xlsx";
}

/// Leave report constants
pub mod leave {
    /// Suffix of a partially downloaded browser file
    pub const PARTIAL_DOWNLOAD_SUFFIX: &str = ".crdownload";

    /// Poll interval while waiting for a download (seconds)
    pub const POLL_INTERVAL_SECS: u64 = 1;

    /// Date format typed into the portal's date range fields
    pub const FORM_DATE_FORMAT: &str = "%d-%m-%Y";

    /// Date format used in renamed report file names
    pub const FILE_STAMP_FORMAT: &str = "%Y%m%d";

    /// Number format for date cells copied into the scrubbed report
    pub const DATE_CELL_FORMAT: &str = "dd/mm/yyyy";
}
