use crate::parser::cmdlet::MODULE_PREFIX;

pub const DEFAULT_CATEGORY: &str = "Other";

/// Maps a module suffix (or any suffix containing `key`) to a category.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub key: &'static str,
    pub category: &'static str,
}

const fn rule(key: &'static str, category: &'static str) -> CategoryRule {
    CategoryRule { key, category }
}

/// Evaluated top to bottom. Order matters for the substring pass: an earlier
/// key that is contained in a module suffix beats any later, more specific key.
pub const CATEGORY_RULES: &[CategoryRule] = &[
    rule("Accounts", "Authentication"),
    rule("Compute", "Compute"),
    rule("Network", "Networking"),
    rule("Storage", "Storage"),
    rule("Sql", "Database"),
    rule("CosmosDb", "Database"),
    rule("Redis", "Database"),
    rule("Monitor", "Monitoring"),
    rule("Advisor", "Governance"),
    rule("Policy", "Governance"),
    rule("Security", "Security"),
    rule("KeyVault", "Security"),
    rule("Identity", "Identity"),
    rule("Aks", "Containers"),
    rule("ContainerInstance", "Containers"),
    rule("ContainerRegistry", "Containers"),
    rule("App", "App Services"),
    rule("Websites", "App Services"),
    rule("Functions", "App Services"),
    rule("Logic", "Integration"),
    rule("ServiceBus", "Messaging"),
    rule("EventHub", "Messaging"),
    rule("EventGrid", "Messaging"),
    rule("NotificationHubs", "Messaging"),
    rule("ApiManagement", "API Management"),
    rule("Resources", "Resources"),
    rule("ResourceMover", "Resources"),
    rule("Cdn", "Networking"),
    rule("Dns", "Networking"),
    rule("FrontDoor", "Networking"),
    rule("TrafficManager", "Networking"),
    rule("VirtualWan", "Networking"),
    rule("PowerBIEmbedded", "Analytics"),
    rule("StreamAnalytics", "Analytics"),
    rule("MachineLearning", "AI & ML"),
    rule("CognitiveServices", "AI & ML"),
    rule("DataFactory", "Data"),
    rule("DataLakeStore", "Data"),
    rule("Synapse", "Data"),
    rule("Databricks", "Data"),
    rule("Batch", "Compute"),
    rule("HDInsight", "Compute"),
    rule("ServiceFabric", "Compute"),
    rule("Automation", "Management"),
    rule("Backup", "Management"),
    rule("RecoveryServices", "Management"),
    rule("OperationalInsights", "Monitoring"),
];

/// Category for a module name such as `Az.KeyVault`.
pub fn category_for(module: &str) -> &'static str {
    category_with(CATEGORY_RULES, module)
}

/// Exact suffix match first, then first rule whose key is a substring of the
/// suffix. Both comparisons ignore case.
pub fn category_with(rules: &[CategoryRule], module: &str) -> &'static str {
    let suffix = module.strip_prefix(MODULE_PREFIX).unwrap_or(module).to_lowercase();

    rules
        .iter()
        .find(|r| r.key.to_lowercase() == suffix)
        .or_else(|| rules.iter().find(|r| suffix.contains(&r.key.to_lowercase())))
        .map_or(DEFAULT_CATEGORY, |r| r.category)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_matches() {
        assert_eq!(category_for("Az.Accounts"), "Authentication");
        assert_eq!(category_for("Az.KeyVault"), "Security");
        assert_eq!(category_for("Az.ContainerRegistry"), "Containers");
        assert_eq!(category_for("Az.OperationalInsights"), "Monitoring");
    }

    #[test]
    fn exact_match_ignores_case() {
        assert_eq!(category_for("Az.keyvault"), "Security");
        assert_eq!(category_for("Az.SQL"), "Database");
    }

    #[test]
    fn substring_fallback() {
        assert_eq!(category_for("Az.MySql"), "Database");
        assert_eq!(category_for("Az.StorageSync"), "Storage");
        assert_eq!(category_for("Az.NetworkCloud"), "Networking");
    }

    #[test]
    fn substring_has_no_word_boundary() {
        // "App" precedes any monitoring rule, so Application Insights lands in App Services.
        assert_eq!(category_for("Az.ApplicationInsights"), "App Services");
    }

    #[test]
    fn exact_beats_earlier_substring() {
        let rules = [rule("App", "App Services"), rule("AppConfig", "Config")];
        assert_eq!(category_with(&rules, "Az.AppConfig"), "Config");
    }

    #[test]
    fn earlier_rule_wins_substring_pass() {
        let rules = [rule("Backup", "Management"), rule("RecoveryServices", "Recovery")];
        assert_eq!(category_with(&rules, "Az.RecoveryServicesBackup"), "Management");

        let reversed = [rule("RecoveryServices", "Recovery"), rule("Backup", "Management")];
        assert_eq!(category_with(&reversed, "Az.RecoveryServicesBackup"), "Recovery");
    }

    #[test]
    fn unknown_module_is_other() {
        assert_eq!(category_for("Az.DataBoxEdge"), DEFAULT_CATEGORY);
        assert_eq!(category_for("Az.Maps"), "Other");
    }
}
