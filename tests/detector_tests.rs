//! Comprehensive tests for the field detector

use field_clone_sdk::models::{FieldDefinition, FieldGroup, FieldKind, FieldValue};
use field_clone_sdk::{FieldDetector, InMemorySchemaProvider};
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

fn product_group() -> FieldGroup {
    let mut group = FieldGroup::new("group_product", "Product Fields");
    group.content_types.push("product".to_string());
    group.fields = vec![
        FieldDefinition::new("field_price", "price", FieldKind::Text),
        FieldDefinition::new("field_stock", "stock", FieldKind::Number),
        FieldDefinition::new("field_divider", "divider", FieldKind::Tab),
        FieldDefinition::new(
            "field_gallery",
            "gallery",
            FieldKind::Repeater {
                children: vec![
                    FieldDefinition::new("field_caption", "caption", FieldKind::Text),
                    FieldDefinition::new("field_image", "image", FieldKind::Image),
                ],
            },
        ),
        FieldDefinition::new(
            "field_dimensions",
            "dimensions",
            FieldKind::Group {
                children: vec![
                    FieldDefinition::new("field_width", "width", FieldKind::Number),
                    FieldDefinition::new("field_height", "height", FieldKind::Number),
                ],
            },
        ),
    ];
    group
}

fn gallery_rows() -> FieldValue {
    let mut row_a = BTreeMap::new();
    row_a.insert("field_caption".to_string(), FieldValue::scalar("a"));
    row_a.insert(
        "field_image".to_string(),
        FieldValue::scalar("https://x/a.png"),
    );
    let mut row_b = BTreeMap::new();
    row_b.insert("field_caption".to_string(), FieldValue::scalar("b"));
    FieldValue::Rows {
        rows: vec![row_a, row_b],
    }
}

fn setup() -> (Arc<InMemorySchemaProvider>, FieldDetector<InMemorySchemaProvider>, Uuid) {
    let provider = Arc::new(InMemorySchemaProvider::new());
    provider.register_group(product_group());
    let record = provider.add_record("product");
    let detector = FieldDetector::new(provider.clone());
    (provider, detector, record)
}

mod list_fields_tests {
    use super::*;

    #[tokio::test]
    async fn test_lists_all_fields_with_presence() {
        let (provider, detector, record) = setup();
        provider.seed_value(record, "field_price", FieldValue::scalar("100"));
        provider.seed_value(record, "field_gallery", gallery_rows());

        let listings = detector.list_fields(record).await.unwrap();
        assert_eq!(listings.len(), 1);
        let fields = &listings[0].fields;
        assert_eq!(fields.len(), 5);

        let price = fields.iter().find(|f| f.definition.key == "field_price").unwrap();
        assert!(price.presence.has_value);
        assert!(price.presence.will_overwrite);

        let stock = fields.iter().find(|f| f.definition.key == "field_stock").unwrap();
        assert!(!stock.presence.has_value);
        assert!(!stock.presence.will_overwrite);

        // Structural fields appear marked but not expanded
        let gallery = fields.iter().find(|f| f.definition.key == "field_gallery").unwrap();
        assert!(gallery.definition.kind.is_structural());
        assert!(gallery.presence.has_value);
    }

    #[tokio::test]
    async fn test_empty_scalar_does_not_flag_overwrite() {
        let (provider, detector, record) = setup();
        provider.seed_value(record, "field_price", FieldValue::scalar(""));

        let listings = detector.list_fields(record).await.unwrap();
        let price = listings[0]
            .fields
            .iter()
            .find(|f| f.definition.key == "field_price")
            .unwrap();
        assert!(price.presence.has_value);
        assert!(!price.presence.will_overwrite);
    }

    #[tokio::test]
    async fn test_unknown_record_yields_empty_listing() {
        let (_, detector, _) = setup();
        let listings = detector.list_fields(Uuid::new_v4()).await.unwrap();
        assert!(listings.is_empty());
    }

    #[tokio::test]
    async fn test_unbound_content_type_yields_empty_listing() {
        let (provider, detector, _) = setup();
        let page = provider.add_record("page");
        let listings = detector.list_fields(page).await.unwrap();
        assert!(listings.is_empty());
    }
}

mod expand_repeater_tests {
    use super::*;

    #[tokio::test]
    async fn test_expands_rows_with_child_presence() {
        let (provider, detector, record) = setup();
        provider.seed_value(record, "field_gallery", gallery_rows());

        let group = product_group();
        let definition = &group.fields[3];
        let rows = detector.expand_repeater(definition, record).await.unwrap();
        assert_eq!(rows.len(), 2);

        assert!(rows[0]["field_caption"].has_value);
        assert!(rows[0]["field_image"].has_value);
        // Second row never set an image
        assert!(rows[1]["field_caption"].has_value);
        assert!(!rows[1]["field_image"].has_value);
    }

    #[tokio::test]
    async fn test_non_repeater_expands_to_nothing() {
        let (_, detector, record) = setup();
        let scalar = FieldDefinition::new("field_price", "price", FieldKind::Text);
        assert!(detector.expand_repeater(&scalar, record).await.unwrap().is_empty());

        let group = product_group();
        let dimensions = &group.fields[4];
        assert!(detector.expand_repeater(dimensions, record).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_repeater_without_value_expands_to_nothing() {
        let (_, detector, record) = setup();
        let group = product_group();
        let definition = &group.fields[3];
        assert!(detector.expand_repeater(definition, record).await.unwrap().is_empty());
    }
}

mod statistics_tests {
    use super::*;

    #[tokio::test]
    async fn test_counts() {
        let (provider, detector, record) = setup();
        provider.seed_value(record, "field_price", FieldValue::scalar("100"));
        provider.seed_value(record, "field_gallery", gallery_rows());

        let stats = detector.field_statistics(record).await.unwrap();
        assert_eq!(stats.total_fields, 5);
        // The tab field is presentational and not cloneable
        assert_eq!(stats.cloneable_fields, 4);
        assert_eq!(stats.fields_with_values, 2);
        assert_eq!(stats.group_fields, 1);
        assert_eq!(stats.repeater_fields, 1);
        assert_eq!(stats.total_groups, 1);
    }

    #[tokio::test]
    async fn test_unknown_record_yields_zero_statistics() {
        let (_, detector, _) = setup();
        let stats = detector.field_statistics(Uuid::new_v4()).await.unwrap();
        assert_eq!(stats, Default::default());
    }
}

mod cache_tests {
    use super::*;

    #[tokio::test]
    async fn test_stats_are_cached_until_invalidated() {
        let (provider, detector, record) = setup();

        let before = detector.field_statistics(record).await.unwrap();
        assert_eq!(before.fields_with_values, 0);

        provider.seed_value(record, "field_price", FieldValue::scalar("100"));

        // Cached result is stale by design
        let stale = detector.field_statistics(record).await.unwrap();
        assert_eq!(stale.fields_with_values, 0);

        detector.invalidate(Some(record));
        let fresh = detector.field_statistics(record).await.unwrap();
        assert_eq!(fresh.fields_with_values, 1);
    }

    #[tokio::test]
    async fn test_invalidate_all() {
        let (provider, detector, record) = setup();
        let other = provider.add_record("product");

        detector.field_statistics(record).await.unwrap();
        detector.field_statistics(other).await.unwrap();
        provider.seed_value(record, "field_price", FieldValue::scalar("1"));
        provider.seed_value(other, "field_price", FieldValue::scalar("1"));

        detector.invalidate(None);
        assert_eq!(detector.field_statistics(record).await.unwrap().fields_with_values, 1);
        assert_eq!(detector.field_statistics(other).await.unwrap().fields_with_values, 1);
    }
}
