//! Certificates and script encryption key
//!
//! `script_encryption_key.gen.cpp` carries the 32-byte AES key used for
//! exported scripts. `certs_compressed.gen.h` optionally embeds a
//! zlib-compressed CA bundle.

use crate::cxx::GENERATED_BANNER;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::io::{self, Write};

static KEY_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9A-Fa-f]{64}$").unwrap());

const ZERO_KEY: &str =
    "0,0,0,0,0,0,0,0, 0,0,0,0,0,0,0,0, 0,0,0,0,0,0,0,0, 0,0,0,0,0,0,0,0";

#[derive(Debug)]
pub enum CertsError {
    /// The key is not exactly 64 hexadecimal characters.
    InvalidEncryptionKey { key: String },
    Compression(io::Error),
}

impl fmt::Display for CertsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CertsError::InvalidEncryptionKey { key } => write!(
                f,
                "invalid AES256 encryption key, not 64 hexadecimal characters: '{}'",
                key
            ),
            CertsError::Compression(e) => write!(f, "cannot compress certificate bundle: {}", e),
        }
    }
}

impl std::error::Error for CertsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CertsError::InvalidEncryptionKey { .. } => None,
            CertsError::Compression(e) => Some(e),
        }
    }
}

/// Render `script_encryption_key.gen.cpp`. Without a key the array is zeroed.
pub fn render_script_key(key: Option<&str>) -> Result<String, CertsError> {
    let bytes = match key {
        None => ZERO_KEY.to_string(),
        Some(key) if KEY_PATTERN.is_match(key) => key
            .as_bytes()
            .chunks(2)
            .map(|pair| format!("0x{}", String::from_utf8_lossy(pair)))
            .collect::<Vec<_>>()
            .join(","),
        Some(key) => {
            return Err(CertsError::InvalidEncryptionKey {
                key: key.to_string(),
            })
        }
    };
    Ok(format!(
        "#include \"core/project_settings.h\"\nuint8_t script_encryption_key[32]={{{}}};\n",
        bytes
    ))
}

/// Render `certs_compressed.gen.h`.
///
/// `bundle` is embedded only when present; the system path is always
/// defined so packagers can point the editor at the platform store.
pub fn render_certs_header(
    bundle: Option<&[u8]>,
    system_certs_path: &str,
) -> Result<String, CertsError> {
    let mut out = String::new();
    out.push_str(GENERATED_BANNER);
    out.push_str("#ifndef _CERTS_RAW_H\n");
    out.push_str("#define _CERTS_RAW_H\n");
    out.push_str(&format!(
        "#define _SYSTEM_CERTS_PATH \"{}\"\n",
        system_certs_path
    ));

    if let Some(bundle) = bundle {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(bundle).map_err(CertsError::Compression)?;
        let compressed = encoder.finish().map_err(CertsError::Compression)?;

        out.push_str("#define BUILTIN_CERTS_ENABLED\n");
        out.push_str(&format!(
            "static const int _certs_compressed_size = {};\n",
            compressed.len()
        ));
        out.push_str(&format!(
            "static const int _certs_uncompressed_size = {};\n",
            bundle.len()
        ));
        out.push_str("static const unsigned char _certs_compressed[] = {\n");
        for byte in &compressed {
            out.push_str(&format!("\t{},\n", byte));
        }
        out.push_str("};\n");
    }

    out.push_str("#endif");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::ZlibDecoder;
    use std::io::Read;

    #[test]
    fn test_default_key_is_zeroed() {
        assert_eq!(
            render_script_key(None).unwrap(),
            "#include \"core/project_settings.h\"\n\
             uint8_t script_encryption_key[32]={0,0,0,0,0,0,0,0, 0,0,0,0,0,0,0,0, 0,0,0,0,0,0,0,0, 0,0,0,0,0,0,0,0};\n"
        );
    }

    #[test]
    fn test_valid_key() {
        let key = "00112233445566778899aabbccddeeff00112233445566778899AABBCCDDEEFF";
        let cpp = render_script_key(Some(key)).unwrap();
        assert!(cpp.contains("={0x00,0x11,0x22,"));
        assert!(cpp.ends_with(",0xEE,0xFF};\n"));
        assert_eq!(cpp.matches("0x").count(), 32);
    }

    #[test]
    fn test_invalid_keys() {
        let long = "a".repeat(66);
        let not_hex = "g".repeat(64);
        for key in ["", "abc", not_hex.as_str(), long.as_str()] {
            assert!(matches!(
                render_script_key(Some(key)),
                Err(CertsError::InvalidEncryptionKey { .. })
            ));
        }
    }

    #[test]
    fn test_header_without_builtin_certs() {
        assert_eq!(
            render_certs_header(None, "/etc/ssl/certs/ca-certificates.crt").unwrap(),
            "/* THIS FILE IS GENERATED DO NOT EDIT */\n\
             #ifndef _CERTS_RAW_H\n\
             #define _CERTS_RAW_H\n\
             #define _SYSTEM_CERTS_PATH \"/etc/ssl/certs/ca-certificates.crt\"\n\
             #endif"
        );
    }

    #[test]
    fn test_embedded_bundle_decompresses() {
        let bundle = b"-----BEGIN CERTIFICATE-----\nMIIB\n-----END CERTIFICATE-----\n".repeat(4);
        let header = render_certs_header(Some(bundle.as_slice()), "").unwrap();
        assert!(header.contains("#define BUILTIN_CERTS_ENABLED\n"));
        assert!(header.contains(&format!(
            "static const int _certs_uncompressed_size = {};\n",
            bundle.len()
        )));

        let start = header.find("_certs_compressed[] = {\n").unwrap();
        let bytes: Vec<u8> = header[start..]
            .lines()
            .skip(1)
            .take_while(|line| *line != "};")
            .map(|line| line.trim().trim_end_matches(',').parse().unwrap())
            .collect();
        assert!(header.contains(&format!(
            "static const int _certs_compressed_size = {};\n",
            bytes.len()
        )));

        let mut decoded = Vec::new();
        ZlibDecoder::new(&bytes[..])
            .read_to_end(&mut decoded)
            .unwrap();
        assert_eq!(decoded, bundle);
        assert!(header.ends_with("};\n#endif"));
    }
}
