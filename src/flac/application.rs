// APPLICATION block implementation for FLAC

use serde::{Serialize, Serializer};

use crate::error::{FormatError, FormatResult};
use crate::utils::encoding::{decode_text, serialize_base64, TextEncoding};
use crate::utils::io::PayloadReader;

/// Third-party application data, tagged with a registered 4-byte ID
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Application {
    #[serde(serialize_with = "serialize_id")]
    pub id: [u8; 4],
    #[serde(serialize_with = "serialize_base64")]
    pub data: Vec<u8>,
}

impl Application {
    pub fn from_bytes(data: &[u8]) -> FormatResult<Self> {
        let mut reader = PayloadReader::new(data);
        let id = reader
            .read_bytes(4)
            .ok_or(FormatError::TruncatedApplication)?;

        Ok(Application {
            id: [id[0], id[1], id[2], id[3]],
            data: reader.read_rest().to_vec(),
        })
    }

    /// Application ID as text, e.g. `"ATCH"`
    pub fn id_string(&self) -> String {
        decode_text(&self.id, TextEncoding::Ascii)
    }
}

fn serialize_id<S: Serializer>(id: &[u8; 4], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&decode_text(id, TextEncoding::Ascii))
}
