use super::model::{Template, TemplateType};
use std::collections::BTreeMap;

/// In-memory template collection.
///
/// Built once at startup and shared read-only (`Arc<TemplateCatalog>`);
/// there is no way to mutate it after construction.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
}

impl TemplateCatalog {
    pub fn new(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Templates whose identifier prefix matches `kind`.
    pub fn by_type(&self, kind: TemplateType) -> impl Iterator<Item = &Template> {
        self.templates
            .iter()
            .filter(move |t| t.id.starts_with(kind.id_prefix()))
    }

    /// Number of templates per type; untyped templates are not counted.
    pub fn counts_by_type(&self) -> BTreeMap<TemplateType, usize> {
        let mut counts = BTreeMap::new();
        for kind in self.templates.iter().filter_map(Template::kind) {
            *counts.entry(kind).or_insert(0) += 1;
        }
        counts
    }
}

impl FromIterator<Template> for TemplateCatalog {
    fn from_iter<I: IntoIterator<Item = Template>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(id: &str) -> Template {
        serde_json::from_value(serde_json::json!({ "id": id })).unwrap()
    }

    #[test]
    fn test_by_type_filters_on_prefix() {
        let catalog: TemplateCatalog = ["TRIG-A-1", "TRIG-B-1", "TRIG-B-2", "SELF-D1", "OTHER"]
            .into_iter()
            .map(template)
            .collect();

        let future: Vec<_> = catalog
            .by_type(TemplateType::FutureRehearsal)
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(future, vec!["TRIG-B-1", "TRIG-B-2"]);
        assert_eq!(catalog.by_type(TemplateType::PerspectiveSwap).count(), 0);

        let counts = catalog.counts_by_type();
        assert_eq!(counts.get(&TemplateType::FutureRehearsal), Some(&2));
        assert_eq!(counts.values().sum::<usize>(), 4);
        assert_eq!(catalog.len(), 5);
    }

    #[test]
    fn test_get_by_id() {
        let catalog = TemplateCatalog::new(vec![template("TRIG-C-7")]);
        assert!(catalog.get("TRIG-C-7").is_some());
        assert!(catalog.get("TRIG-C-8").is_none());
        assert!(TemplateCatalog::empty().is_empty());
    }
}
