//! Project file persistence.
//!
//! # Responsibility
//! - Save and open `.wwproj` files through [`ProjectCodec`].
//! - Keep the project/file association consistent across save-as and open.
//!
//! # Invariants
//! - File handles are scoped to one call and closed on every exit path.
//! - Encoding (and validation) finishes before the target file is touched.
//!
//! # See also
//! - `project::codec` for the byte layout.

use super::codec::{error_code, CodecError, CodecResult, ProjectCodec};
use super::model::Project;
use log::{error, info};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// File extension of project files, without the dot.
pub const PROJECT_FILE_EXTENSION: &str = "wwproj";

/// Suggested file name for a save dialog, e.g. `Test Project.wwproj`.
pub fn default_file_name(project: &Project) -> String {
    let name = project.name.trim();
    let stem = if name.is_empty() {
        "Untitled Project"
    } else {
        name
    };
    format!("{stem}.{PROJECT_FILE_EXTENSION}")
}

/// Saves `project` to its associated file.
///
/// # Errors
/// - `UnassociatedFile` when the project has no file; the caller decides
///   whether to prompt for one and use [`save_project_as`].
pub fn save_project(codec: &ProjectCodec<'_>, project: &Project) -> CodecResult<()> {
    let path = project.file().ok_or(CodecError::UnassociatedFile)?;
    write_project_file(codec, project, path)
}

/// Binds `path` to `project` and saves it there.
///
/// The association is only updated when the write succeeds.
pub fn save_project_as(
    codec: &ProjectCodec<'_>,
    project: &mut Project,
    path: impl Into<PathBuf>,
) -> CodecResult<()> {
    let path = path.into();
    write_project_file(codec, project, &path)?;
    project.set_file(Some(path));
    Ok(())
}

/// Opens and decodes a project file, binding the path to the result.
pub fn open_project(codec: &ProjectCodec<'_>, path: impl AsRef<Path>) -> CodecResult<Project> {
    let started_at = Instant::now();
    let path = path.as_ref();
    info!("event=project_open module=project status=start");

    let result = File::open(path)
        .map_err(CodecError::from)
        .and_then(|file| codec.decode_from(&mut BufReader::new(file)));

    match result {
        Ok(mut project) => {
            project.set_file(Some(path.to_path_buf()));
            info!(
                "event=project_open module=project status=ok duration_ms={} words={}",
                started_at.elapsed().as_millis(),
                project.lexicon().len()
            );
            Ok(project)
        }
        Err(err) => {
            error!(
                "event=project_open module=project status=error duration_ms={} error_code={} error={}",
                started_at.elapsed().as_millis(),
                error_code(&err),
                err
            );
            Err(err)
        }
    }
}

fn write_project_file(codec: &ProjectCodec<'_>, project: &Project, path: &Path) -> CodecResult<()> {
    let started_at = Instant::now();
    info!("event=project_save module=project status=start");

    let result = codec.encode(project).and_then(|bytes| {
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(bytes.len())
    });

    match result {
        Ok(bytes) => {
            info!(
                "event=project_save module=project status=ok duration_ms={} bytes={}",
                started_at.elapsed().as_millis(),
                bytes
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=project_save module=project status=error duration_ms={} error_code={} error={}",
                started_at.elapsed().as_millis(),
                error_code(&err),
                err
            );
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::default_file_name;
    use crate::project::Project;

    #[test]
    fn default_file_name_uses_project_name() {
        assert_eq!(default_file_name(&Project::new("Test Project")), "Test Project.wwproj");
        assert_eq!(default_file_name(&Project::new("  ")), "Untitled Project.wwproj");
    }
}
