//! Package assembly.
//!
//! Orchestrates the full pipeline: datatype catalog, global symbol
//! table, datatype module, then one generated module per metaschema.
//! Writing is all-or-nothing: the destination is checked before any
//! file is created.

use std::fs;
use std::path::{Path, PathBuf};

use metagen_schema::MetaschemaSet;
use tracing::info;

use crate::catalog::build_catalog;
use crate::error::CodegenError;
use crate::module::{GeneratedModule, ModuleGenerator, generate_datatype_module};
use crate::render::Render;
use crate::sanitize::sanitize;
use crate::symbols::gather_references;

/// Extension of generated module files.
pub const MODULE_FILE_EXTENSION: &str = "gen";

/// Generates a package of modules from a parsed metaschema set,
/// without writing anything to disk.
///
/// Order: datatype catalog, then the global symbol table, then the
/// datatype module, then one module per metaschema in set order.
///
/// # Errors
/// Returns `CodegenError` if any reference fails to resolve.
pub fn generate_package(
    set: &MetaschemaSet,
    renderer: &dyn Render,
) -> Result<Package, CodegenError> {
    let catalog = build_catalog(&set.datatypes);
    let global_refs = gather_references(set);

    let mut modules = vec![generate_datatype_module(&catalog, renderer)];
    let mut root_elements = Vec::new();

    for metaschema in &set.metaschemas {
        modules.push(ModuleGenerator::new(metaschema, &global_refs).generate(renderer)?);

        let module_name = sanitize(&metaschema.short_name);
        for assembly in &metaschema.assemblies {
            if assembly.is_root() {
                root_elements.push(format!("{}.{}", module_name, sanitize(&assembly.formal_name)));
            }
        }
    }

    Ok(Package {
        modules,
        root_elements,
    })
}

/// The result of one generation run: the ordered generated modules
/// (datatype module first) and the package's document roots.
#[derive(Debug, Clone)]
pub struct Package {
    /// Generated modules in emission order.
    pub modules: Vec<GeneratedModule>,
    /// Qualified class names of assemblies declaring a root name.
    pub root_elements: Vec<String>,
}

/// Assembles a package of generated modules from a metaschema set.
pub struct PackageGenerator<'a> {
    metaschema_set: &'a MetaschemaSet,
    destination: PathBuf,
    package_name: String,
    ignore_existing_files: bool,
}

impl<'a> PackageGenerator<'a> {
    /// Creates a package generator.
    #[must_use]
    pub fn new(
        metaschema_set: &'a MetaschemaSet,
        destination: impl Into<PathBuf>,
        package_name: impl Into<String>,
        ignore_existing_files: bool,
    ) -> Self {
        Self {
            metaschema_set,
            destination: destination.into(),
            package_name: package_name.into(),
            ignore_existing_files,
        }
    }

    /// Runs the pipeline over every metaschema in the set.
    ///
    /// # Errors
    /// Returns `CodegenError` if any module fails to generate; nothing
    /// is produced for a set with an unresolvable reference.
    pub fn generate(&self, renderer: &dyn Render) -> Result<Package, CodegenError> {
        let package = generate_package(self.metaschema_set, renderer)?;
        info!(
            package = %self.package_name,
            modules = package.modules.len(),
            roots = package.root_elements.len(),
            "package generated"
        );
        Ok(package)
    }

    /// Writes a generated package under the destination directory.
    ///
    /// The destination must exist, be a directory, and be empty unless
    /// existing files are explicitly ignored; the check runs before
    /// anything is written.
    ///
    /// # Errors
    /// Returns `CodegenError::DestinationInvalid` if the pre-flight
    /// check fails, or an IO error from writing.
    pub fn write(&self, package: &Package) -> Result<(), CodegenError> {
        self.check_destination()?;

        let package_path = self.destination.join(&self.package_name);
        if self.ignore_existing_files {
            fs::create_dir_all(&package_path)?;
        } else {
            fs::create_dir(&package_path)?;
        }

        for module in &package.modules {
            let file_name = format!("{}.{}", module.module_name, MODULE_FILE_EXTENSION);
            fs::write(package_path.join(file_name), &module.source)?;
        }

        info!(path = %package_path.display(), "package written");
        Ok(())
    }

    /// Generates and writes in one step.
    ///
    /// # Errors
    /// Returns `CodegenError` from either stage.
    pub fn run(&self, renderer: &dyn Render) -> Result<Package, CodegenError> {
        let package = self.generate(renderer)?;
        self.write(&package)?;
        Ok(package)
    }

    fn check_destination(&self) -> Result<(), CodegenError> {
        let path: &Path = &self.destination;
        if !path.exists() {
            return Err(CodegenError::destination(path, "does not exist"));
        }
        if !path.is_dir() {
            return Err(CodegenError::destination(path, "is not a directory"));
        }
        if !self.ignore_existing_files {
            let mut entries = path
                .read_dir()
                .map_err(|err| CodegenError::destination(path, format!("not readable: {err}")))?;
            if entries.next().is_some() {
                return Err(CodegenError::destination(path, "is not empty"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::TextRenderer;
    use metagen_schema::{AssemblyDecl, DataType, FieldDecl, Metaschema, SimpleDataType};

    fn test_set() -> MetaschemaSet {
        let mut set = MetaschemaSet::new();
        set.add_datatype(DataType::Simple(SimpleDataType::new(
            "StringDatatype".to_string(),
            Some("string".to_string()),
            "xs:string".to_string(),
        )));

        let mut common = Metaschema::new(
            "common.xml".to_string(),
            "common".to_string(),
            "1.0".to_string(),
        );
        common.add_global("metadata", "Document Metadata");
        common.fields.push(FieldDecl {
            name: "title".to_string(),
            formal_name: "Title".to_string(),
            as_type: "string".to_string(),
            description: None,
            use_name: None,
            props: Vec::new(),
            flags: Vec::new(),
            constraints: Vec::new(),
        });

        let mut catalog = Metaschema::new(
            "catalog.xml".to_string(),
            "catalog".to_string(),
            "1.0".to_string(),
        );
        catalog.add_import("common.xml");
        catalog.assemblies.push(AssemblyDecl {
            name: "catalog".to_string(),
            formal_name: "Catalog".to_string(),
            description: None,
            use_name: None,
            root_name: Some("catalog".to_string()),
            props: Vec::new(),
            flags: Vec::new(),
            model_refs: vec!["metadata".to_string()],
            constraints: Vec::new(),
        });

        set.add_metaschema(common);
        set.add_metaschema(catalog);
        set
    }

    #[test]
    fn test_generate_orders_datatype_module_first() {
        let set = test_set();
        let renderer = TextRenderer::new();
        let generator = PackageGenerator::new(&set, "/tmp", "pkg", false);

        let package = generator.generate(&renderer).expect("generates");
        assert_eq!(package.modules.len(), 3);
        assert_eq!(package.modules[0].module_name, "datatypes");
        assert_eq!(package.modules[1].module_name, "common");
        assert_eq!(package.modules[2].module_name, "catalog");
    }

    #[test]
    fn test_generate_collects_roots() {
        let set = test_set();
        let renderer = TextRenderer::new();
        let generator = PackageGenerator::new(&set, "/tmp", "pkg", false);

        let package = generator.generate(&renderer).expect("generates");
        assert_eq!(package.root_elements, vec!["catalog.Catalog"]);
    }

    #[test]
    fn test_cross_module_reference_resolves() {
        let set = test_set();
        let renderer = TextRenderer::new();
        let generator = PackageGenerator::new(&set, "/tmp", "pkg", false);

        let package = generator.generate(&renderer).expect("generates");
        let catalog_module = &package.modules[2];
        assert!(catalog_module.source.contains("member common.DocumentMetadata"));
        assert!(catalog_module.source.contains("import common.DocumentMetadata"));
    }

    #[test]
    fn test_write_package() {
        let set = test_set();
        let renderer = TextRenderer::new();
        let dir = tempfile::tempdir().expect("tempdir");
        let generator = PackageGenerator::new(&set, dir.path(), "oscal", false);

        let package = generator.generate(&renderer).expect("generates");
        generator.write(&package).expect("writes");

        let datatypes = dir.path().join("oscal").join("datatypes.gen");
        assert!(datatypes.exists());
        let content = fs::read_to_string(datatypes).expect("readable");
        assert!(content.contains("datatype StringDatatype"));
    }

    #[test]
    fn test_write_missing_destination_fails() {
        let set = test_set();
        let renderer = TextRenderer::new();
        let generator = PackageGenerator::new(&set, "/nonexistent/destination", "pkg", false);

        let package = generator.generate(&renderer).expect("generates");
        let err = generator.write(&package).expect_err("pre-flight fails");
        assert!(matches!(err, CodegenError::DestinationInvalid { .. }));
    }

    #[test]
    fn test_write_non_directory_destination_fails() {
        let set = test_set();
        let renderer = TextRenderer::new();
        let dir = tempfile::tempdir().expect("tempdir");
        let file_path = dir.path().join("a-file");
        fs::write(&file_path, "x").expect("writable");

        let generator = PackageGenerator::new(&set, &file_path, "pkg", false);
        let package = generator.generate(&renderer).expect("generates");
        let err = generator.write(&package).expect_err("pre-flight fails");
        assert!(err.to_string().contains("is not a directory"));
    }

    #[cfg(unix)]
    #[test]
    fn test_write_unreadable_destination_reports_path() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("tempdir");
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).expect("create");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).expect("chmod");

        // Privileged users can list the directory anyway; only assert
        // when the permission actually denies the read.
        if locked.read_dir().is_err() {
            let set = test_set();
            let renderer = TextRenderer::new();
            let generator = PackageGenerator::new(&set, &locked, "pkg", false);
            let package = generator.generate(&renderer).expect("generates");
            let err = generator.write(&package).expect_err("pre-flight fails");
            assert!(matches!(err, CodegenError::DestinationInvalid { .. }));
            assert!(err.to_string().contains("locked"));
            assert!(err.to_string().contains("not readable"));
        }

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("chmod back");
    }

    #[test]
    fn test_write_non_empty_destination_fails_without_overwrite() {
        let set = test_set();
        let renderer = TextRenderer::new();
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("existing"), "x").expect("writable");

        let generator = PackageGenerator::new(&set, dir.path(), "pkg", false);
        let package = generator.generate(&renderer).expect("generates");
        let err = generator.write(&package).expect_err("pre-flight fails");
        assert!(err.to_string().contains("is not empty"));
    }

    #[test]
    fn test_write_non_empty_destination_with_overwrite() {
        let set = test_set();
        let renderer = TextRenderer::new();
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("existing"), "x").expect("writable");

        let generator = PackageGenerator::new(&set, dir.path(), "pkg", true);
        let package = generator.generate(&renderer).expect("generates");
        generator.write(&package).expect("writes with overwrite");
    }

    #[test]
    fn test_pipeline_idempotent() {
        let set = test_set();
        let renderer = TextRenderer::new();
        let generator = PackageGenerator::new(&set, "/tmp", "pkg", false);

        let first = generator.generate(&renderer).expect("generates");
        let second = generator.generate(&renderer).expect("generates");

        for (a, b) in first.modules.iter().zip(&second.modules) {
            assert_eq!(a.module_name, b.module_name);
            assert_eq!(a.source, b.source);
        }
    }
}
