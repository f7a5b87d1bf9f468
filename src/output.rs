// Creates the missing parent directories of a render target. A bare file
// name has an empty parent, which create_dir_all rejects.
pub fn ensure_parent_dir(path: impl AsRef<std::path::Path>) -> std::io::Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    Ok(())
}
