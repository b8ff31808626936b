//! Default document mapping.

use std::collections::HashSet;
use std::path::Path;

use plcm_model::Document;
use plcm_persistence::{ProjectFile, document_to_project, project_to_document};

use super::ProjectMapper;
use crate::error::{AppError, Result};

/// Maps through the `plcm-persistence` snapshot conversions.
///
/// Rejects projects in which two PLCs share an id.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotMapper;

impl ProjectMapper for SnapshotMapper {
    fn map_from_storage(&self, path: &Path, project: ProjectFile) -> Result<Document> {
        let mut seen = HashSet::with_capacity(project.plcs.len());
        if let Some(duplicate) = project.plcs.iter().find(|plc| !seen.insert(plc.id)) {
            return Err(AppError::mapping(format!(
                "PLC id {} appears more than once",
                duplicate.id
            )));
        }
        Ok(project_to_document(Some(path.to_path_buf()), project))
    }

    fn map_to_storage(&self, document: &Document) -> Result<ProjectFile> {
        Ok(document_to_project(document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plcm_model::{DataType, Device, NodePath, Variable};
    use std::path::PathBuf;

    #[test]
    fn test_round_trip_sets_backing_file() {
        let mut document = Document::new();
        let id = document.add_device(Device::new("Press", "10.0.0.5"));
        document
            .edit_device(id)
            .unwrap()
            .add_variable(
                &NodePath::root(),
                Variable::new("Running", "DB1.DBX0.0", DataType::Bool),
            )
            .unwrap();

        let project = SnapshotMapper.map_to_storage(&document).unwrap();
        let path = PathBuf::from("/tmp/line.plcson");
        let restored = SnapshotMapper.map_from_storage(&path, project).unwrap();

        assert_eq!(restored.file_path(), Some(path.as_path()));
        assert_eq!(restored.devices(), document.devices());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut project = SnapshotMapper
            .map_to_storage(&{
                let mut document = Document::new();
                document.add_device(Device::new("Press", "10.0.0.5"));
                document
            })
            .unwrap();
        let copy = project.plcs[0].clone();
        project.plcs.push(copy);

        let err = SnapshotMapper
            .map_from_storage(Path::new("/tmp/dup.plcson"), project)
            .unwrap_err();
        assert!(matches!(err, AppError::Mapping { .. }));
    }
}
