//! Subcommand arguments and handlers
//!
//! Handlers return the text to print so they can be exercised without a
//! terminal. `main` owns stdout and the exit code.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use multiformat_cid::{Cid, Multihash};
use multiformat_encoding::multicodec::{self, CodecTable};
use multiformat_encoding::{Base, identify_encoding};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{CliError, Result};

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Multibase encoding to use (e.g. base58btc, base32, base64url)
    #[arg(short, long, default_value = "base58btc")]
    pub base: Base,

    /// Omit the multibase prefix character
    #[arg(long)]
    pub no_prefix: bool,

    /// Treat the input as hex-encoded bytes instead of UTF-8 text
    #[arg(long)]
    pub hex: bool,

    /// Data to encode
    pub input: String,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Print the decoded bytes as hex
    #[arg(long)]
    pub hex: bool,

    /// Multibase string to decode
    pub text: String,
}

#[derive(Args, Debug)]
pub struct IdentifyArgs {
    /// Multibase string to identify
    pub text: String,
}

#[derive(Args, Debug)]
pub struct CidArgs {
    #[command(subcommand)]
    pub command: CidCommand,
}

#[derive(Subcommand, Debug)]
pub enum CidCommand {
    /// Show the version, content type and multihash of a CID
    Inspect {
        cid: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Re-encode a CID, optionally upgrading CIDv0 to CIDv1
    Convert {
        cid: String,

        /// Text encoding for the output (CIDv0 only supports base58btc)
        #[arg(short, long)]
        base: Option<Base>,

        /// Convert to CIDv1
        #[arg(long)]
        v1: bool,
    },

    /// Hash a file into a CID
    Hash {
        file: PathBuf,

        /// Multicodec content type
        #[arg(short, long, default_value = "raw")]
        codec: String,

        /// Multihash function
        #[arg(long = "hash", default_value = "sha2-256")]
        hash_function: String,

        /// Text encoding for the output
        #[arg(short, long, default_value = "base32")]
        base: Base,

        /// Produce a CIDv0 (dag-pb, sha2-256 only)
        #[arg(long)]
        v0: bool,
    },
}

pub fn encode(args: &EncodeArgs) -> Result<String> {
    let bytes = if args.hex {
        hex::decode(args.input.trim())?
    } else {
        args.input.as_bytes().to_vec()
    };
    debug!(base = %args.base, len = bytes.len(), "encoding input");
    Ok(multiformat_encoding::encode(args.base, &bytes, !args.no_prefix)?)
}

pub fn decode(args: &DecodeArgs) -> Result<String> {
    let (base, bytes) = multiformat_encoding::decode(args.text.trim())?;
    info!(base = %base, len = bytes.len(), "decoded multibase");
    if args.hex {
        return Ok(hex::encode(bytes));
    }
    String::from_utf8(bytes).map_err(|_| CliError::NotUtf8)
}

pub fn identify(args: &IdentifyArgs) -> Result<String> {
    identify_encoding(&args.text)
        .map(|base| base.name().to_string())
        .ok_or_else(|| CliError::UnknownEncoding(args.text.chars().take(1).collect()))
}

/// Flattened view of a CID for display
#[derive(Debug, Serialize)]
pub struct CidInfo {
    pub cid: String,
    pub version: u64,
    pub codec: u64,
    pub codec_name: Option<String>,
    pub hash: u64,
    pub hash_name: Option<String>,
    pub digest: String,
}

impl CidInfo {
    pub fn new(cid: &Cid, table: &dyn CodecTable) -> Self {
        let hash = cid.hash();
        Self {
            cid: cid.to_string(),
            version: cid.version().into(),
            codec: cid.codec(),
            codec_name: table.name(cid.codec()).map(str::to_string),
            hash: hash.code(),
            hash_name: table.name(hash.code()).map(str::to_string),
            digest: hex::encode(hash.digest()),
        }
    }

    fn render(&self) -> String {
        let named = |name: &Option<String>, code: u64| match name {
            Some(name) => format!("{name} (0x{code:x})"),
            None => format!("0x{code:x}"),
        };
        [
            format!("cid:       {}", self.cid),
            format!("version:   {}", self.version),
            format!("codec:     {}", named(&self.codec_name, self.codec)),
            format!("multihash: {}", named(&self.hash_name, self.hash)),
            format!("length:    {}", self.digest.len() / 2),
            format!("digest:    {}", self.digest),
        ]
        .join("\n")
    }
}

pub fn cid(args: &CidArgs) -> Result<String> {
    let table = multicodec::default_table();
    match &args.command {
        CidCommand::Inspect { cid, json } => {
            let info = CidInfo::new(&Cid::parse(cid.trim())?, table);
            if *json {
                Ok(serde_json::to_string_pretty(&info)?)
            } else {
                Ok(info.render())
            }
        }
        CidCommand::Convert { cid, base, v1 } => {
            let mut cid = Cid::parse(cid.trim())?;
            if *v1 {
                cid = cid.into_v1();
            }
            match base {
                Some(base) => Ok(cid.to_string_of_base(*base)?),
                None => Ok(cid.to_string()),
            }
        }
        CidCommand::Hash {
            file,
            codec,
            hash_function,
            base,
            v0,
        } => {
            let data = std::fs::read(file)?;
            let hash_code = table
                .code(hash_function)
                .ok_or_else(|| CliError::UnknownCodec(hash_function.clone()))?;
            let hash = Multihash::compute(hash_code, &data)?;
            info!(file = %file.display(), len = data.len(), "hashed file");

            if *v0 {
                return Ok(Cid::new_v0(&hash)?.to_string());
            }
            let codec = table
                .code(codec)
                .ok_or_else(|| CliError::UnknownCodec(codec.clone()))?;
            Ok(Cid::new_v1(codec, hash).to_string_of_base(*base)?)
        }
    }
}
