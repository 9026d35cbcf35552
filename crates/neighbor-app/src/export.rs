use neighbor_core::TreeNode;
use neighbor_tree::wire;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
        }
    }
}

/// `<Topic>.<ext>`, with path separators in the topic replaced.
pub fn export_file_name(topic: &str, format: ExportFormat) -> String {
    let stem: String = topic
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{stem}.{}", format.extension())
}

/// One `keywords` column with a leading row index, `\n`-terminated.
pub fn names_to_csv(names: &[String]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(["", "keywords"])?;
    for (idx, name) in names.iter().enumerate() {
        writer.write_record([idx.to_string().as_str(), name.as_str()])?;
    }
    writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))
}

pub fn tree_to_json(tree: &TreeNode) -> Result<Vec<u8>, ExportError> {
    Ok(wire::to_json(tree)?.into_bytes())
}

pub fn render(
    format: ExportFormat,
    tree: &TreeNode,
    names: &[String],
) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Csv => names_to_csv(names),
        ExportFormat::Json => tree_to_json(tree),
    }
}

/// Writes an export to `path`, or to `<dir>/<Topic>.<ext>` when `path` is a
/// directory. Returns the file written.
pub fn write_export(
    path: &Path,
    topic: &str,
    format: ExportFormat,
    tree: &TreeNode,
    names: &[String],
) -> Result<PathBuf, ExportError> {
    let target = if path.is_dir() {
        path.join(export_file_name(topic, format))
    } else {
        path.to_path_buf()
    };
    let bytes = render(format, tree, names)?;
    fs::write(&target, &bytes)?;
    info!(
        path = %target.display(),
        mime = format.mime(),
        bytes = bytes.len(),
        wire_version = wire::WIRE_FORMAT_VERSION,
        "Wrote export"
    );
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use neighbor_tree::flatten_names;

    fn sample() -> TreeNode {
        let mut root = TreeNode::root("Root");
        let mut group = TreeNode::group("B");
        group.children.push(TreeNode::leaf("A, Jr."));
        root.children.push(group);
        root
    }

    #[test]
    fn test_csv_layout() {
        let names = flatten_names(&sample());
        let csv = String::from_utf8(names_to_csv(&names).unwrap()).unwrap();
        assert_eq!(csv, ",keywords\n0,Root\n1,B\n2,\"A, Jr.\"\n");
    }

    #[test]
    fn test_csv_header_only_when_empty() {
        let csv = String::from_utf8(names_to_csv(&[]).unwrap()).unwrap();
        assert_eq!(csv, ",keywords\n");
    }

    #[test]
    fn test_json_export_is_payload() {
        let bytes = tree_to_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["name"], "Root");
        assert_eq!(value["children"][0]["children"][0]["size"], 2);
    }

    #[test]
    fn test_file_names() {
        assert_eq!(export_file_name("Paris", ExportFormat::Csv), "Paris.csv");
        assert_eq!(export_file_name("AC/DC", ExportFormat::Json), "AC_DC.json");
    }

    #[test]
    fn test_write_export_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let tree = sample();
        let names = flatten_names(&tree);

        let written = write_export(dir.path(), "Root", ExportFormat::Csv, &tree, &names).unwrap();
        assert_eq!(written, dir.path().join("Root.csv"));
        assert!(std::fs::read_to_string(&written).unwrap().starts_with(",keywords\n"));

        let explicit = dir.path().join("custom.json");
        let written = write_export(&explicit, "Root", ExportFormat::Json, &tree, &names).unwrap();
        assert_eq!(written, explicit);
        assert!(std::fs::read_to_string(&written).unwrap().contains("\"Root\""));
    }
}
