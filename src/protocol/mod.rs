//! Protocol Module
//!
//! The memcached text protocol subset used by the client.
//!
//! ## Requests
//! ```text
//! set <key> <flags> <exptime> <bytes>\r\n<data>\r\n
//! get <key>\r\n
//! delete <key>\r\n
//! ```
//!
//! ## Responses
//! ```text
//! STORED | NOT_STORED | DELETED | NOT_FOUND | END | ERROR
//! CLIENT_ERROR <message> | SERVER_ERROR <message>
//! VALUE <key> <flags> <bytes> [<cas>]\r\n<data>\r\n
//! ```
//!
//! Every line ends with `\r\n`. Value blocks are length-delimited, not
//! terminator-delimited.

mod codec;
mod command;
mod reader;
mod response;

pub use codec::{
    decode_delete, decode_get, decode_set, encode_command, encode_command_into, write_command,
    CRLF,
};
pub use command::{validate_key, validate_value, Command, CommandKind, MAX_KEY_LENGTH};
pub use reader::{ResponseReader, MAX_LINE_LENGTH};
pub use response::{Item, Response, ResponseLine};
