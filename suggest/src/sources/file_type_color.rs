// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words setuid setgid nlink

use std::{fs, path::Path};

use crate::{FileTypeColors, SgrColor, SuggestionConfig};

/// The color `ls` would use for `path`. Returns [`None`] if the path can't be
/// inspected.
#[must_use]
pub fn file_type_color(path: &Path, colors: &FileTypeColors) -> Option<SgrColor> {
    let metadata = fs::symlink_metadata(path).ok()?;
    let file_type = metadata.file_type();

    let color = if file_type.is_symlink() {
        if fs::metadata(path).is_ok() {
            &colors.symlink
        } else {
            &colors.symlink_broken
        }
    } else if file_type.is_dir() {
        if fs::read_dir(path).is_ok() {
            &colors.dir
        } else {
            &colors.dir_unreadable
        }
    } else {
        special_file_color(&metadata, colors)
            .or_else(|| extension_color(path, colors))
            .unwrap_or(&colors.file)
    };

    Some(color.clone())
}

#[cfg(unix)]
fn special_file_color<'a>(
    metadata: &fs::Metadata,
    colors: &'a FileTypeColors,
) -> Option<&'a SgrColor> {
    use std::os::unix::fs::{FileTypeExt, MetadataExt, PermissionsExt};

    let file_type = metadata.file_type();
    let mode = metadata.permissions().mode();
    let is_empty = metadata.len() == 0;

    if file_type.is_socket() {
        Some(&colors.socket)
    } else if file_type.is_fifo() {
        Some(&colors.fifo)
    } else if file_type.is_block_device() {
        Some(&colors.block_device)
    } else if file_type.is_char_device() {
        Some(&colors.char_device)
    } else if mode & 0o4000 != 0 {
        Some(&colors.setuid)
    } else if mode & 0o2000 != 0 {
        Some(&colors.setgid)
    } else if mode & 0o111 != 0 {
        Some(if is_empty {
            &colors.exec_empty
        } else {
            &colors.exec
        })
    } else if is_empty {
        Some(&colors.file_empty)
    } else if metadata.nlink() > 1 {
        Some(&colors.multi_hardlink)
    } else {
        None
    }
}

#[cfg(not(unix))]
fn special_file_color<'a>(
    metadata: &fs::Metadata,
    colors: &'a FileTypeColors,
) -> Option<&'a SgrColor> {
    (metadata.len() == 0).then_some(&colors.file_empty)
}

fn extension_color<'a>(path: &Path, colors: &'a FileTypeColors) -> Option<&'a SgrColor> {
    let extension = path.extension()?.to_string_lossy().to_lowercase();
    colors.extensions.get(&extension)
}

/// Color for a suggestion naming `path`. Falls back to the plain file suggestion color
/// when coloring by file type is off, or the type has no color of its own.
#[must_use]
pub fn suggestion_color_for_path(path: &Path, config: &SuggestionConfig) -> SgrColor {
    if config.color_by_file_type {
        match file_type_color(path, &config.file_type_colors) {
            Some(color) if !color.is_empty() => return color,
            _ => {}
        }
    }
    config.colors.file.clone()
}

/// Color for a suggestion that is known to be a directory, without touching the file
/// system (jump targets, ancestors of the current directory).
#[must_use]
pub fn suggestion_dir_color(config: &SuggestionConfig) -> SgrColor {
    if config.color_by_file_type {
        config.file_type_colors.dir.clone()
    } else {
        config.colors.file.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    #[test]
    fn test_dir_and_file_colors() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("notes.md"), "hello").unwrap();
        let colors = FileTypeColors::default();

        assert_eq2!(
            file_type_color(&dir.path().join("sub"), &colors),
            Some(colors.dir.clone())
        );
        assert_eq2!(
            file_type_color(&dir.path().join("notes.md"), &colors),
            Some(colors.file.clone())
        );
        assert_eq2!(file_type_color(&dir.path().join("missing"), &colors), None);
    }

    #[test]
    fn test_extension_color() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("main.RS"), "fn main() {}").unwrap();
        let mut colors = FileTypeColors::default();
        colors.extensions.insert("rs".into(), SgrColor::new("38;5;208"));

        assert_eq2!(
            file_type_color(&dir.path().join("main.RS"), &colors),
            Some(SgrColor::new("38;5;208"))
        );
    }

    #[test]
    fn test_empty_file_color() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("empty"), "").unwrap();
        let colors = FileTypeColors::default();
        assert_eq2!(
            file_type_color(&dir.path().join("empty"), &colors),
            Some(colors.file_empty.clone())
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_colors() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("target"), "x").unwrap();
        std::os::unix::fs::symlink(dir.path().join("target"), dir.path().join("good"))
            .unwrap();
        std::os::unix::fs::symlink(dir.path().join("nowhere"), dir.path().join("bad"))
            .unwrap();
        let colors = FileTypeColors::default();

        assert_eq2!(
            file_type_color(&dir.path().join("good"), &colors),
            Some(colors.symlink.clone())
        );
        assert_eq2!(
            file_type_color(&dir.path().join("bad"), &colors),
            Some(colors.symlink_broken.clone())
        );
    }

    #[test]
    fn test_suggestion_color_falls_back_to_file_color() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("plain"), "x").unwrap();
        let mut config = SuggestionConfig {
            color_by_file_type: true,
            ..Default::default()
        };
        // Plain files have no color of their own by default.
        assert_eq2!(
            suggestion_color_for_path(&dir.path().join("plain"), &config),
            config.colors.file.clone()
        );

        fs::create_dir(dir.path().join("sub")).unwrap();
        assert_eq2!(
            suggestion_color_for_path(&dir.path().join("sub"), &config),
            config.file_type_colors.dir.clone()
        );

        config.color_by_file_type = false;
        assert_eq2!(
            suggestion_color_for_path(&dir.path().join("sub"), &config),
            config.colors.file.clone()
        );
    }
}
