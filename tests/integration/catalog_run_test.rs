//! End-to-end runs over a feed directory

#[cfg(test)]
mod catalog_run_tests {
    use assert_matches::assert_matches;
    use partsfeed::{run, CatalogError, RunConfig};
    use pretty_assertions::assert_eq;
    use quick_xml::events::Event;
    use quick_xml::Reader;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    /// Parsed `SHOPITEM` element
    #[derive(Debug, Default, PartialEq)]
    struct Item {
        name: String,
        code: String,
        categories: Vec<String>,
        price_vat: String,
        vat: String,
    }

    fn read_items(path: &Path) -> Vec<Item> {
        let xml = fs::read_to_string(path).unwrap();
        let mut reader = Reader::from_str(&xml);
        reader.trim_text(true);

        let mut items = Vec::new();
        let mut current = Item::default();
        let mut tag = String::new();
        loop {
            match reader.read_event().unwrap() {
                Event::Start(e) => {
                    tag = String::from_utf8(e.name().as_ref().to_vec()).unwrap();
                    if tag == "SHOPITEM" {
                        current = Item::default();
                    }
                }
                Event::Text(t) => {
                    let text = t.unescape().unwrap().into_owned();
                    match tag.as_str() {
                        "NAME" => current.name = text,
                        "CODE" => current.code = text,
                        "CATEGORY" => current.categories.push(text),
                        "PRICE_VAT" => current.price_vat = text,
                        "VAT" => current.vat = text,
                        _ => {}
                    }
                }
                Event::End(e) if e.name().as_ref() == b"SHOPITEM" => {
                    items.push(std::mem::take(&mut current));
                }
                Event::Eof => break,
                _ => {}
            }
        }
        items
    }

    fn write_feed(dir: &Path, file: &str, vehicle: &str, categories: &str) {
        let content = format!(r#"{{"vehicle": {{"name": "{vehicle}"}}, "categories": {categories}}}"#);
        fs::write(dir.join(file), content).unwrap();
    }

    #[test]
    fn test_example_truck_feed() {
        let source = tempdir().unwrap();
        write_feed(
            source.path(),
            "truck.json",
            "Truck",
            r#"[{
                "name": "Engine",
                "spare_parts": [
                    {"product": {"name": "Filter", "product_no": "F1", "vat_percent": 20, "unit_price_incl_vat": 15.5}},
                    {"product": {"name": "No number"}}
                ],
                "categories": [{
                    "name": "Oil",
                    "spare_parts": [{"product": {"name": "Filter", "product_no": "F1", "vat_percent": 20, "unit_price_incl_vat": 15.5}}]
                }]
            }]"#,
        );
        let output = tempdir().unwrap();
        let output_path = output.path().join("output.xml");

        let report = run(&RunConfig::new(source.path(), &output_path)).unwrap();
        assert_eq!(report.statistics.distinct_products, 1);
        assert_eq!(report.statistics.parts_skipped, 1);

        let items = read_items(&output_path);
        assert_eq!(
            items,
            vec![Item {
                name: "Filter".into(),
                code: "F1".into(),
                categories: vec!["Truck > Engine".into(), "Truck > Engine > Oil".into()],
                price_vat: "15.5".into(),
                vat: "20".into(),
            }]
        );
    }

    #[test]
    fn test_files_are_merged_in_name_order() {
        let source = tempdir().unwrap();
        write_feed(
            source.path(),
            "b_van.json",
            "Van",
            r#"[{"name": "Wheels", "spare_parts": [{"product": {"name": "Nut (van)", "product_no": "N1", "vat_percent": 10}}]}]"#,
        );
        write_feed(
            source.path(),
            "a_car.json",
            "Car / Sedan",
            r#"[{"name": "Wheels", "spare_parts": [
                {"product": {"name": "Hub cap", "product_no": "H1"}},
                {"product": {"name": "Nut", "product_no": "N1", "vat_percent": 21, "unit_price_incl_vat": 0.75}}
            ]}]"#,
        );
        fs::write(source.path().join("list.json"), "[1, 2]").unwrap();
        fs::write(source.path().join("notes.txt"), "not a feed").unwrap();

        let output = tempdir().unwrap();
        let output_path = output.path().join("catalog.xml");
        let report = run(&RunConfig::new(source.path(), &output_path)).unwrap();

        assert_eq!(report.statistics.files_found, 3);
        assert_eq!(report.statistics.files_processed, 2);
        assert_eq!(report.statistics.files_skipped, 1);

        let items = read_items(&output_path);
        let codes: Vec<&str> = items.iter().map(|i| i.code.as_str()).collect();
        assert_eq!(codes, vec!["H1", "N1"]);

        let nut = &items[1];
        assert_eq!(nut.name, "Nut");
        assert_eq!(nut.vat, "21");
        assert_eq!(nut.price_vat, "0.75");
        assert_eq!(
            nut.categories,
            vec!["Car > Sedan > Wheels".to_string(), "Van > Wheels".to_string()]
        );
        assert_eq!(items[0].price_vat, "0");
        assert_eq!(items[0].vat, "0");
    }

    #[test]
    fn test_test_mode_caps_products() {
        let source = tempdir().unwrap();
        let parts: Vec<String> = (0..25)
            .map(|i| format!(r#"{{"product": {{"name": "Part {i}", "product_no": "P{i}"}}}}"#))
            .collect();
        write_feed(
            source.path(),
            "a.json",
            "Truck",
            &format!(r#"[{{"name": "Misc", "spare_parts": [{}]}}]"#, parts.join(",")),
        );
        write_feed(
            source.path(),
            "b.json",
            "Van",
            r#"[{"name": "Misc", "spare_parts": [{"product": {"name": "Extra", "product_no": "X"}}]}]"#,
        );

        let output = tempdir().unwrap();
        let output_path = output.path().join("test.xml");
        let config = RunConfig::new(source.path(), &output_path).with_test_mode(10);
        let report = run(&config).unwrap();

        assert!(report.statistics.stopped_at_cap);
        assert_eq!(report.statistics.files_processed, 1);
        let items = read_items(&output_path);
        assert_eq!(items.len(), 10);
        assert!(items.iter().all(|i| i.code != "X"));

        // Same input without test mode keeps everything
        let full_path = output.path().join("full.xml");
        run(&RunConfig::new(source.path(), &full_path)).unwrap();
        assert_eq!(read_items(&full_path).len(), 26);
    }

    #[test]
    fn test_recursive_reads_sub_directories() {
        let source = tempdir().unwrap();
        fs::create_dir(source.path().join("2024")).unwrap();
        write_feed(
            &source.path().join("2024"),
            "bus.json",
            "Bus",
            r#"[{"name": "Doors", "spare_parts": [{"product": {"name": "Seal", "product_no": "S1"}}]}]"#,
        );

        let output = tempdir().unwrap();
        let flat = output.path().join("flat.xml");
        run(&RunConfig::new(source.path(), &flat)).unwrap();
        assert!(read_items(&flat).is_empty());

        let deep = output.path().join("deep.xml");
        run(&RunConfig::new(source.path(), &deep).with_recursive(true)).unwrap();
        assert_eq!(read_items(&deep).len(), 1);
    }

    #[test]
    fn test_deeply_nested_feed_is_fully_extracted() {
        let depth = 200;
        let mut categories = String::new();
        for level in 0..depth {
            categories.push_str(&format!(r#"[{{"name": "L{level}", "categories": "#));
        }
        categories.push_str(
            r#"[{"name": "Bottom", "spare_parts": [{"product": {"name": "Pin", "product_no": "P1", "vat_percent": 21}}]}]"#,
        );
        categories.push_str(&"}]".repeat(depth));

        let source = tempdir().unwrap();
        write_feed(source.path(), "deep.json", "Truck", &categories);
        let output = tempdir().unwrap();
        let output_path = output.path().join("deep.xml");

        let report = run(&RunConfig::new(source.path(), &output_path)).unwrap();
        assert_eq!(report.statistics.files_processed, 1);

        let items = read_items(&output_path);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].code, "P1");
        let path = &items[0].categories[0];
        assert_eq!(path.matches(" > ").count(), depth + 1);
        assert!(path.starts_with("Truck > L0 > L1"));
        assert!(path.ends_with("L199 > Bottom"));
    }

    #[test]
    fn test_mixed_scalar_types_keep_the_file() {
        let source = tempdir().unwrap();
        write_feed(
            source.path(),
            "mixed.json",
            "Truck",
            r#"[{"name": "Engine", "spare_parts": [
                {"product": {"name": "Gasket", "product_no": "G1", "vat_percent": 20, "unit_price_incl_vat": 4}},
                {"product": {"name": 505, "product_no": "O1", "vat_percent": "21", "unit_price_incl_vat": "12.90"}},
                null,
                42
            ]}]"#,
        );
        let output = tempdir().unwrap();
        let output_path = output.path().join("mixed.xml");

        let report = run(&RunConfig::new(source.path(), &output_path)).unwrap();
        assert_eq!(report.statistics.files_skipped, 0);
        assert_eq!(report.statistics.parts_skipped, 2);

        let items = read_items(&output_path);
        let codes: Vec<&str> = items.iter().map(|i| i.code.as_str()).collect();
        assert_eq!(codes, vec!["G1", "O1"]);
        assert_eq!(items[1].name, "505");
        assert_eq!(items[1].vat, "21");
        assert_eq!(items[1].price_vat, "12.90");
    }

    #[test]
    fn test_unreadable_source_aborts() {
        let output = tempdir().unwrap();
        let config = RunConfig::new(output.path().join("nope"), output.path().join("out.xml"));
        assert_matches!(run(&config), Err(CatalogError::SourceDirectory { .. }));
    }
}
