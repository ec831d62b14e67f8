use anyhow::{anyhow, Result};
use derive_more::Deref;
use std::ffi::OsStr;
use std::path::PathBuf;

#[derive(Deref, Debug)]
pub struct SrcFilepath(PathBuf);
impl TryFrom<PathBuf> for SrcFilepath {
    type Error = anyhow::Error;
    fn try_from(p: PathBuf) -> Result<Self> {
        if p.extension() == Some(OsStr::new("snarl")) {
            Ok(Self(p))
        } else {
            Err(anyhow!("The snarl source file must have extension `.snarl`."))
        }
    }
}

#[derive(Deref, Debug)]
pub struct AsmFilepath(PathBuf);
impl From<PathBuf> for AsmFilepath {
    fn from(p: PathBuf) -> Self {
        Self(p)
    }
}
