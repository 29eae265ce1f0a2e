use crate::config::FilterConfig;
use crate::model::Listing;
use crate::utils::norm;

const AVAILABLE: &str = "disponible";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    pub query: String,
    pub offer_type: String,
    pub only_available: bool,
}

impl From<&FilterConfig> for ListingFilter {
    fn from(cfg: &FilterConfig) -> Self {
        Self {
            query: cfg.query.clone(),
            offer_type: cfg.offer_type.clone(),
            only_available: cfg.only_available,
        }
    }
}

impl ListingFilter {
    pub fn matches(&self, listing: &Listing) -> bool {
        let query = norm(&self.query);
        if !query.is_empty() {
            let haystack = format!(
                "{} {} {}",
                norm(&listing.title),
                norm(&listing.description),
                norm(&listing.address)
            );
            if !haystack.contains(&query) {
                return false;
            }
        }

        let offer_type = norm(&self.offer_type);
        if !offer_type.is_empty() && listing.offer_type != offer_type {
            return false;
        }

        !self.only_available || norm(&listing.status) == AVAILABLE
    }

    pub fn apply<'a>(&self, listings: &'a [Listing]) -> Vec<&'a Listing> {
        listings.iter().filter(|l| self.matches(l)).collect()
    }
}

pub fn status_line(visible: usize) -> String {
    if visible == 0 {
        "No listings match the filter.".into()
    } else {
        format!("Showing {} listing(s).", visible)
    }
}
