
use std::{collections::HashSet, str::FromStr};

/// Highest page number accepted in a [PageSelection].
pub const MAX_PAGE_NUMBER: i32 = 100_000;

/// Extraction algorithm for Tabula to use.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum ExtractionMethod {
    /// Lets Tabula decide per page between [ExtractionMethod::Lattice] and
    /// [ExtractionMethod::Stream].
    Guess,
    /// Detects table cells from ruling lines.
    Lattice,
    /// Infers table boundaries from whitespace between text.
    #[default]
    Stream,
}

impl ExtractionMethod {
    pub fn to_tabula_extraction_method(self) -> tabula::ExtractionMethod {
        match self {
            ExtractionMethod::Stream => tabula::ExtractionMethod::Basic,
            ExtractionMethod::Guess => tabula::ExtractionMethod::Decide,
            ExtractionMethod::Lattice => tabula::ExtractionMethod::Spreadsheet,
        }
    }
}

/// Selection of pages within a PDF to extract tables from.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum PageSelection {
    #[default]
    All,
    /// 1-based page numbers, without duplicates, in the order first given.
    Pages(Vec<i32>),
}

impl PageSelection {
    /// Returns the page numbers in the form that Tabula accepts, where `None` selects all pages.
    pub fn to_tabula_pages(&self) -> Option<&[i32]> {
        match self {
            PageSelection::All => None,
            PageSelection::Pages(pages) => Some(pages),
        }
    }
}

impl std::fmt::Display for PageSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageSelection::All => write!(f, "all"),
            PageSelection::Pages(pages) => {
                for (i, page) in pages.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{page}")?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum PageSelectionError {
    #[error("empty page item in {0:?}")]
    EmptyItem(String),
    #[error("invalid page number {0:?}")]
    InvalidPage(String),
    #[error("page numbers start at 1, got {0}")]
    PageOutOfRange(i64),
    #[error("page number {page} is above the limit of {limit}")]
    PageAboveLimit { page: i64, limit: i32 },
    #[error("page range {start}-{end} ends before it starts")]
    ReversedRange { start: i32, end: i32 },
}

impl FromStr for PageSelection {
    type Err = PageSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(PageSelection::All);
        }

        let mut pages: Vec<i32> = Vec::new();
        let mut seen: HashSet<i32> = HashSet::new();
        for item in s.split(',') {
            let item = item.trim();
            if item.is_empty() {
                return Err(PageSelectionError::EmptyItem(s.to_owned()));
            }

            let (start, end) = match item.split_once('-') {
                Some((start, end)) => (parse_page(start)?, parse_page(end)?),
                None => {
                    let page = parse_page(item)?;
                    (page, page)
                }
            };
            if end < start {
                return Err(PageSelectionError::ReversedRange { start, end });
            }

            for page in start..=end {
                if seen.insert(page) {
                    pages.push(page);
                }
            }
        }

        Ok(PageSelection::Pages(pages))
    }
}

fn parse_page(s: &str) -> Result<i32, PageSelectionError> {
    let s = s.trim();
    let value: i64 = s
        .parse()
        .map_err(|_| PageSelectionError::InvalidPage(s.to_owned()))?;
    if value < 1 {
        return Err(PageSelectionError::PageOutOfRange(value));
    }
    if value > i64::from(MAX_PAGE_NUMBER) {
        return Err(PageSelectionError::PageAboveLimit {
            page: value,
            limit: MAX_PAGE_NUMBER,
        });
    }
    // Bounded by MAX_PAGE_NUMBER above.
    Ok(value as i32)
}
