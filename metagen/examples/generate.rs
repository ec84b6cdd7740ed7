//! Generates a small two-module package and prints the result.
//!
//! Run with: `cargo run --example generate`

use metagen::prelude::*;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut set = MetaschemaSet::new();

    let mut string_dt = SimpleDataType::new(
        "StringDatatype".to_string(),
        Some("string".to_string()),
        "xs:string".to_string(),
    );
    string_dt.pattern = Some("\\S(.*\\S)?".to_string());
    set.add_datatype(DataType::Simple(string_dt));
    set.add_datatype(DataType::Simple(SimpleDataType::new(
        "TokenDatatype".to_string(),
        Some("token".to_string()),
        "StringDatatype".to_string(),
    )));

    let mut common = Metaschema::new(
        "common.xml".to_string(),
        "common".to_string(),
        "1.0".to_string(),
    );
    common.add_global("title", "Document Title");
    common.fields.push(
        RawDeclaration::new()
            .with_attr("@name", "title")
            .with_attr("@as-type", "string")
            .with_child("formal-name", "Document Title")
            .to_field()
            .expect("valid field"),
    );
    set.add_metaschema(common);

    let mut catalog = Metaschema::new(
        "catalog.xml".to_string(),
        "catalog".to_string(),
        "1.0".to_string(),
    );
    catalog.add_import("common.xml");
    let mut root = RawDeclaration::new()
        .with_attr("@name", "catalog")
        .with_child("formal-name", "Catalog")
        .with_child("root-name", "catalog");
    root.model_refs.push("title".to_string());
    catalog.assemblies.push(root.to_assembly().expect("valid assembly"));
    set.add_metaschema(catalog);

    let renderer = TextRenderer::new();
    let package = generate_package(&set, &renderer).expect("generation succeeds");

    for module in &package.modules {
        println!("--- {} ---", module.module_name);
        println!("{}", module.source);
    }
    println!("roots: {:?}", package.root_elements);
}
