//! Sentence templates per relationship label.

use netrca_core::models::Relation;

/// Template for an edge, in stored direction.
/// `{source}` and `{target}` are the endpoint names.
pub fn template_for(relation: Relation) -> &'static str {
    match relation {
        Relation::Causes => "{source} causes {target}",
        Relation::CausedBy => "{source} is caused by {target}",
        Relation::DependsOn => "{source} depends on {target}",
        Relation::Violates => "{source} violates {target}",
        Relation::MitigatedBy => "{source} is mitigated by {target}",
        Relation::TriggeredBy => "{source} is triggered by {target}",
        Relation::Influences => "{source} influences {target}",
    }
}

pub fn render(relation: Relation, source: &str, target: &str) -> String {
    template_for(relation)
        .replace("{source}", source)
        .replace("{target}", target)
}
