use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::process;
use crate::config::InstallOptions;

/// Copy built products out of the package manager's bin path into
/// `install_dir`.
pub fn run(options: &InstallOptions) -> Result<Vec<PathBuf>> {
    let bin_path = process::capture_bin_path(&options.build)?;
    tracing::debug!(bin_path = %bin_path.display(), "resolved bin path");

    copy_products(&bin_path, &options.install_dir, &options.products)
}

fn copy_products(
    bin_path: &Path,
    install_dir: &Path,
    products: &[String],
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(install_dir)
        .with_context(|| format!("Failed to create install directory {:?}", install_dir))?;

    let mut installed = Vec::with_capacity(products.len());
    for product in products {
        let src = bin_path.join(product);
        let dest = install_dir.join(product);

        if !src.is_file() {
            anyhow::bail!("Product '{}' not found at {:?}", product, src);
        }

        println!(
            "installing {}: {} -> {}",
            product,
            src.display(),
            dest.display()
        );
        // fs::copy carries the permission bits over, so executables stay executable
        std::fs::copy(&src, &dest)
            .with_context(|| format!("Failed to copy {:?} to {:?}", src, dest))?;
        installed.push(dest);
    }

    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "swiftpm-helper-install-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_copies_every_product() {
        let dir = scratch_dir("copies");
        let bin = dir.join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        std::fs::write(bin.join("swift-driver"), "driver").unwrap();
        std::fs::write(bin.join("swift-help"), "help").unwrap();

        let install_dir = dir.join("prefix/bin");
        let products = vec!["swift-driver".to_string(), "swift-help".to_string()];
        let installed = copy_products(&bin, &install_dir, &products).unwrap();

        assert_eq!(
            installed,
            vec![install_dir.join("swift-driver"), install_dir.join("swift-help")]
        );
        assert_eq!(
            std::fs::read_to_string(install_dir.join("swift-help")).unwrap(),
            "help"
        );

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_product_names_it() {
        let dir = scratch_dir("missing");
        let err = copy_products(&dir, &dir.join("out"), &["swift-driver".to_string()])
            .unwrap_err();

        assert!(err.to_string().contains("'swift-driver' not found"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
