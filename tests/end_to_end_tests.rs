#[cfg(test)]
mod tests {
    use html2rest::parser::*;
    use html2rest::*;
    use serde::{Deserialize, Serialize};

    use std::fs::File;
    use std::io::Read;
    use std::path::Path;
    use test_generator::test_resources;

    #[derive(Serialize, Deserialize, Debug, Default)]
    #[serde(rename_all = "camelCase")]
    struct FixtureOptions {
        #[serde(default)]
        pub document_uri: Option<String>,
        #[serde(default)]
        pub image_link_prefixes: Vec<String>,
        #[serde(default)]
        pub typeface_max_len: Option<usize>,
    }

    impl FixtureOptions {
        fn into_emit_options(self) -> EmitOptions {
            let mut options = EmitOptions::default();
            options.document_uri = self.document_uri;
            options.image_link_prefixes = self.image_link_prefixes;
            if let Some(max_len) = self.typeface_max_len {
                options.typeface_max_len = max_len;
            }
            options
        }
    }

    const TEST_TEXTURE_DIR: &str = "";

    fn test(resource: &str) {
        let source = get_source_from_dir(resource);
        let options = get_options_from_dir(resource).into_emit_options();
        let actual = html_to_rest(source.as_str(), options).unwrap();
        let expected = get_expected_from_dir(resource);
        if actual.trim() != expected.trim() {
            println!("Expected:\n{}\n\nActual:\n{}", expected.trim(), actual.trim());
        }
        assert_eq!(actual.trim(), expected.trim());
    }

    fn get_file_content(file_path: &str) -> String {
        let path = Path::new(file_path);
        let mut content = String::new();
        let mut file = File::open(path).unwrap();
        file.read_to_string(&mut content).unwrap();
        content
    }

    fn get_source_from_dir(dir: &str) -> String {
        let fil_path = format!("{}{}/source.html", TEST_TEXTURE_DIR, dir);
        get_file_content(fil_path.as_str())
    }

    fn get_expected_from_dir(dir: &str) -> String {
        let fil_path = format!("{}{}/expected.rst", TEST_TEXTURE_DIR, dir);
        get_file_content(fil_path.as_str())
    }

    fn get_options_from_dir(dir: &str) -> FixtureOptions {
        let fil_path = format!("{}{}/options.json", TEST_TEXTURE_DIR, dir);
        if !Path::new(fil_path.as_str()).exists() {
            return FixtureOptions::default();
        }
        let options_string = get_file_content(fil_path.as_str());
        serde_json::from_str(options_string.as_str()).unwrap()
    }

    #[test_resources("tests/test_textures/*")]
    fn run(resource: &str) {
        if resource.ends_with("DS_Store") {
            return;
        }
        test(resource);
    }

    #[test]
    fn debug_this() {
        let resource = match std::env::var("HTML2REST_DEBUG_RESOURCE") {
            Ok(value) => value,
            Err(_) => return,
        };
        let source = get_source_from_dir(resource.as_str());
        let options = get_options_from_dir(resource.as_str()).into_emit_options();
        let actual = html_to_rest(source.as_str(), options).unwrap();
        let expected = get_expected_from_dir(resource.as_str());
        std::fs::write("/tmp/html2rest-expected.rst", expected.as_bytes()).unwrap();
        std::fs::write("/tmp/html2rest-actual.rst", actual.as_bytes()).unwrap();
        println!("Wrote /tmp/html2rest-expected.rst and /tmp/html2rest-actual.rst");
    }

    #[test]
    fn same_tree_renders_identically() {
        let html = get_source_from_dir("tests/test_textures/table-with-links");
        let tree = build_tree(&parse_html(html.as_str()), &EmitOptions::default());
        assert_eq!(emit(&tree).unwrap(), emit(&tree).unwrap());
    }

    #[test]
    fn typeface_limit_is_configurable() {
        let html = "<p><b>short words</b></p>";
        let mut options = EmitOptions::default();
        options.typeface_max_len = 5;
        assert_eq!(html_to_rest(html, options).unwrap(), "\nshort words");
        assert_eq!(html_to_rest(html, EmitOptions::default()).unwrap(), "\n**short words**");
    }

    #[test]
    fn substitution_context_is_configurable() {
        let html = r#"<ul><li><a href="/x">x</a></li></ul>"#;
        let mut options = EmitOptions::default();
        options.substitution_kinds = vec![NodeKind::ListItem];
        assert_eq!(html_to_rest(html, options).unwrap(), "* `x`_ \n\n.. _x: /x");
        assert_eq!(html_to_rest(html, EmitOptions::default()).unwrap(), "* `x </x>`_");
    }

    #[test]
    fn hand_built_tree_with_nested_table() {
        let mut tree = DocumentTree::new();
        let outer = tree.append(tree.root(), DocNode::new(NodeKind::Table));
        let row = tree.append(outer, DocNode::new(NodeKind::TableRow));
        let cell = tree.append(row, DocNode::new(NodeKind::TableData));
        let inner = tree.append(cell, DocNode::new(NodeKind::Table));
        let inner_row = tree.append(inner, DocNode::new(NodeKind::TableRow));
        let inner_cell = tree.append(inner_row, DocNode::new(NodeKind::TableData));
        tree.append(inner_cell, DocNode::text("in"));
        let second = tree.append(row, DocNode::new(NodeKind::TableData));
        tree.append(second, DocNode::text("out"));

        let rest = emit(&tree).unwrap();
        assert_eq!(rest, "\n\n+-------------+---+\n|+--+ |in| +--+|out|\n+-------------+---+");
    }
}
