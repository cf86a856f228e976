use std::collections::HashMap;

use poller_logging::poller_warn;

use crate::{Indicator, UrlStatus};

/// Display health of one configured URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlHealth {
    /// No status reported yet for this run.
    Pending,
    /// Reported, but the page yielded no lines.
    NoData,
    Producing,
    /// The backend flagged the URL, typically because its line count moved.
    LineCountChanged,
}

impl UrlHealth {
    pub fn of(status: Option<&UrlStatus>) -> Self {
        match status {
            None => UrlHealth::Pending,
            Some(status) if status.error => UrlHealth::LineCountChanged,
            Some(status) if status.has_data => UrlHealth::Producing,
            Some(_) => UrlHealth::NoData,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            UrlHealth::Pending | UrlHealth::NoData => "No data",
            UrlHealth::Producing => "Producing data",
            UrlHealth::LineCountChanged => "Line count changed",
        }
    }

    pub fn indicator(self) -> Indicator {
        match self {
            UrlHealth::Pending | UrlHealth::NoData => Indicator::Gray,
            UrlHealth::Producing => Indicator::Green,
            UrlHealth::LineCountChanged => Indicator::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UrlSummary {
    pub ok: usize,
    pub fail: usize,
    pub pending: usize,
}

/// Latest health record per configured URL, iterated in configuration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlHealthRegistry {
    links: Vec<String>,
    records: HashMap<String, UrlStatus>,
}

impl UrlHealthRegistry {
    pub fn with_links<I, S>(links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::default();
        registry.configure(links);
        registry
    }

    /// Replaces the key set. Records of URLs that are no longer configured are
    /// dropped; repeated links keep their first position.
    pub fn configure<I, S>(&mut self, links: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for link in links {
            let link = link.into();
            if !unique.contains(&link) {
                unique.push(link);
            }
        }
        self.records.retain(|url, _| unique.contains(url));
        self.links = unique;
    }

    /// Stores `status` as the record for its URL. Returns whether the stored
    /// record changed; statuses for unconfigured URLs are ignored.
    pub fn upsert(&mut self, status: UrlStatus) -> bool {
        if !self.is_configured(&status.url) {
            poller_warn!("Ignoring status for unconfigured url={}", status.url);
            return false;
        }
        if self.records.get(&status.url) == Some(&status) {
            return false;
        }
        self.records.insert(status.url.clone(), status);
        true
    }

    pub fn get(&self, url: &str) -> Option<&UrlStatus> {
        self.records.get(url)
    }

    /// Reported records, in configuration order.
    pub fn all(&self) -> Vec<&UrlStatus> {
        self.links
            .iter()
            .filter_map(|link| self.records.get(link))
            .collect()
    }

    /// Every configured URL with its record, if any.
    pub fn entries(&self) -> impl Iterator<Item = (&str, Option<&UrlStatus>)> {
        self.links
            .iter()
            .map(|link| (link.as_str(), self.records.get(link)))
    }

    pub fn summarize(&self) -> UrlSummary {
        self.entries()
            .fold(UrlSummary::default(), |mut summary, (_, record)| {
                match record {
                    None => summary.pending += 1,
                    Some(status) if status.error => summary.fail += 1,
                    Some(_) => summary.ok += 1,
                }
                summary
            })
    }

    /// Forgets every record; all configured URLs become pending.
    pub fn reset(&mut self) {
        self.records.clear();
    }

    pub fn has_records(&self) -> bool {
        !self.records.is_empty()
    }

    pub fn links(&self) -> &[String] {
        &self.links
    }

    fn is_configured(&self, url: &str) -> bool {
        self.links.iter().any(|link| link == url)
    }
}
