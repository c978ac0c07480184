//! Setup and output helpers shared by the demonstration binaries.

use std::{
    fs,
    path::{ Path, PathBuf },
};
use anyhow::Context;
use ndarray_npy::NpzWriter;

/// Initialize `env_logger`, defaulting to the `info` level when `RUST_LOG` is
/// unset.
pub fn init_logging() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    )
    .format_timestamp_millis()
    .init();
}

/// Create (if necessary) and return the output directory.
pub fn outdir() -> anyhow::Result<PathBuf> {
    let outdir = PathBuf::from("output");
    fs::create_dir_all(&outdir)
        .with_context(|| format!("couldn't create {}", outdir.display()))?;
    Ok(outdir)
}

/// Create a `.npz` archive at `path` and hand its writer to `fill`.
///
/// Prefer the [`write_npz!`] macro, which expands to a call to this function.
pub fn write_npz_with<P, F>(path: P, fill: F) -> anyhow::Result<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut NpzWriter<fs::File>) -> anyhow::Result<()>,
{
    let path = path.as_ref();
    let file = fs::File::create(path)
        .with_context(|| format!("couldn't create {}", path.display()))?;
    let mut npz = NpzWriter::new(file);
    fill(&mut npz)?;
    npz.finish()
        .with_context(|| format!("couldn't finish {}", path.display()))?;
    log::info!("wrote {}", path.display());
    Ok(())
}

/// Write a set of named arrays to a single `.npz` file.
///
/// ```ignore
/// write_npz!(
///     outdir.join("run.npz"),
///     arrays: { "t" => &t, "phi" => &phi }
/// )?;
/// ```
#[macro_export]
macro_rules! write_npz {
    ( $path:expr, arrays: { $( $name:expr => $arr:expr ),* $(,)? } ) => {
        $crate::write_npz_with($path, |npz| {
            $( npz.add_array($name, $arr)?; )*
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use ndarray as nd;
    use ndarray_npy::NpzReader;
    use super::*;

    #[test]
    fn npz_holds_every_array() {
        let path = std::env::temp_dir()
            .join(format!("xwave-workspace-{}.npz", std::process::id()));
        let t: nd::Array1<f64> = nd::Array1::linspace(0.0, 1.0, 5);
        let field: nd::Array2<f64> = nd::Array2::from_shape_fn((3, 4), |(i, j)| (i * j) as f64);
        write_npz!(&path, arrays: { "t" => &t, "field" => &field }).unwrap();

        let mut npz = NpzReader::new(fs::File::open(&path).unwrap()).unwrap();
        assert_eq!(npz.len(), 2);
        let t_read: nd::Array1<f64> = npz.by_index(0).unwrap();
        let field_read: nd::Array2<f64> = npz.by_index(1).unwrap();
        assert_eq!(t_read, t);
        assert_eq!(field_read, field);
        fs::remove_file(&path).unwrap();
    }
}
