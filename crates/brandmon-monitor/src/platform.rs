//! Per-platform descriptor table.
//!
//! Everything that differs between platforms lives here as data: the domains
//! a link is routed by, the search query, the scrape dataset, and the field
//! mapping used by [`crate::extract`]. The pipeline itself is platform-agnostic.

use brandmon_brightdata::ScrapeParams;
use brandmon_core::Platform;

/// Fallback used when a raw record lacks a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    /// A placeholder string.
    Text(&'static str),
    /// A numeric counter, rendered as the string `"0"`.
    Count,
    /// A boolean flag, `false`.
    Flag,
    /// An empty list.
    List,
}

/// Maps one raw provider key onto one normalized output key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub output: &'static str,
    pub source: &'static str,
    pub default: FieldDefault,
}

const fn field(output: &'static str, source: &'static str, default: FieldDefault) -> FieldSpec {
    FieldSpec {
        output,
        source,
        default,
    }
}

/// Same key on both sides.
const fn same(key: &'static str, default: FieldDefault) -> FieldSpec {
    field(key, key, default)
}

#[derive(Debug)]
pub struct PlatformDescriptor {
    pub platform: Platform,
    /// Hosts (and their subdomains) routed to this platform.
    pub domains: &'static [&'static str],
    /// `site:` filters OR-ed into the search query.
    pub query_sites: &'static [&'static str],
    pub dataset_id: &'static str,
    pub include_errors: bool,
    /// Label used in scrape logs.
    pub scrape_tag: &'static str,
    /// What one item is called in prompts ("post", "video", ...).
    pub item_noun: &'static str,
    pub fields: &'static [FieldSpec],
}

const URL: FieldSpec = same("url", FieldDefault::Text(""));

static LINKEDIN: PlatformDescriptor = PlatformDescriptor {
    platform: Platform::LinkedIn,
    domains: &["linkedin.com"],
    query_sites: &["linkedin.com"],
    dataset_id: "gd_lyy3tktm25m4avu764",
    include_errors: false,
    scrape_tag: "linkedin",
    item_noun: "post",
    fields: &[
        URL,
        same("headline", FieldDefault::Text("No headline")),
        same("post_text", FieldDefault::Text("No post text available")),
        same("hashtags", FieldDefault::List),
        same("tagged_companies", FieldDefault::List),
        same("tagged_people", FieldDefault::List),
        field("original_poster", "user_id", FieldDefault::Text("Unknown user")),
    ],
};

static INSTAGRAM: PlatformDescriptor = PlatformDescriptor {
    platform: Platform::Instagram,
    domains: &["instagram.com"],
    query_sites: &["instagram.com"],
    dataset_id: "gd_lk5ns7kz21pck8jpis",
    include_errors: true,
    scrape_tag: "instagram",
    item_noun: "post",
    fields: &[
        URL,
        same("description", FieldDefault::Text("No description available")),
        same("likes", FieldDefault::Count),
        same("num_comments", FieldDefault::Count),
        same("is_paid_partnership", FieldDefault::Flag),
        same("followers", FieldDefault::Count),
        field("original_poster", "user_posted", FieldDefault::Text("Unknown user")),
    ],
};

static YOUTUBE: PlatformDescriptor = PlatformDescriptor {
    platform: Platform::YouTube,
    domains: &["youtube.com", "youtu.be"],
    query_sites: &["youtube.com", "youtu.be"],
    dataset_id: "gd_lk56epmy2i5g7lzu0k",
    include_errors: true,
    scrape_tag: "youtube",
    item_noun: "video",
    fields: &[
        URL,
        same("title", FieldDefault::Text("No Title")),
        same("description", FieldDefault::Text("No description available")),
        field("original_poster", "youtuber", FieldDefault::Text("Unknown creator")),
        same("verified", FieldDefault::Flag),
        same("views", FieldDefault::Count),
        same("likes", FieldDefault::Count),
        same("hashtags", FieldDefault::List),
        same("transcript", FieldDefault::Text("No transcript available")),
    ],
};

static X: PlatformDescriptor = PlatformDescriptor {
    platform: Platform::X,
    domains: &["x.com", "twitter.com"],
    query_sites: &["twitter.com", "x.com"],
    dataset_id: "gd_lwxkxvnf1cynvib9co",
    include_errors: true,
    scrape_tag: "twitter",
    item_noun: "post",
    fields: &[
        URL,
        same("views", FieldDefault::Count),
        same("likes", FieldDefault::Count),
        same("replies", FieldDefault::Count),
        same("reposts", FieldDefault::Count),
        same("hashtags", FieldDefault::List),
        same("quotes", FieldDefault::Count),
        same("bookmarks", FieldDefault::Count),
        same("description", FieldDefault::Text("No description available")),
        same("tagged_users", FieldDefault::List),
        field("original_poster", "user_posted", FieldDefault::Text("Unknown user")),
    ],
};

/// Descriptor for `platform`.
#[must_use]
pub fn descriptor(platform: Platform) -> &'static PlatformDescriptor {
    match platform {
        Platform::LinkedIn => &LINKEDIN,
        Platform::Instagram => &INSTAGRAM,
        Platform::YouTube => &YOUTUBE,
        Platform::X => &X,
    }
}

impl PlatformDescriptor {
    /// Search query for `brand`, e.g. `"Acme" site:youtube.com OR site:youtu.be`.
    #[must_use]
    pub fn search_query(&self, brand: &str) -> String {
        let sites = self
            .query_sites
            .iter()
            .map(|site| format!("site:{site}"))
            .collect::<Vec<_>>()
            .join(" OR ");
        format!("\"{brand}\" {sites}")
    }

    #[must_use]
    pub fn scrape_params(&self) -> ScrapeParams {
        let params = ScrapeParams::new(self.dataset_id);
        if self.include_errors {
            params.include_errors(true)
        } else {
            params
        }
    }

    /// Whether `host` (already lowercased) is one of this platform's domains
    /// or a subdomain of one.
    #[must_use]
    pub fn matches_host(&self, host: &str) -> bool {
        self.domains.iter().any(|domain| {
            host == *domain
                || host
                    .strip_suffix(domain)
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }
}
