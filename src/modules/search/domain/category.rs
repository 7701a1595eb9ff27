use crate::modules::show::Show;

/// Case-insensitive containment in either direction, so "Prime Video"
/// matches "Amazon Prime Video" and vice versa.
pub fn matches_category(label: &str, network: &str) -> bool {
    let label = label.trim().to_lowercase();
    let network = network.trim().to_lowercase();
    if label.is_empty() || network.is_empty() {
        return false;
    }
    network.contains(&label) || label.contains(&network)
}

/// Catalog shows whose network/channel matches `label`, in catalog order
pub fn filter_by_category(catalog: &[Show], label: &str) -> Vec<Show> {
    catalog
        .iter()
        .filter(|show| {
            show.network
                .as_deref()
                .is_some_and(|network| matches_category(label, network))
        })
        .cloned()
        .collect()
}
