//! WebSocket Real-Time Streaming
//!
//! Streams live train predictions to dashboard clients via WebSocket.
//!
//! ## Architecture
//!
//! - **ConnectionHub**: Manages all active connections and the latest
//!   prediction snapshot
//! - **Handler**: Handles WebSocket upgrade and message processing
//! - **Messages**: Defines client and server message formats
//!
//! The feed is a single stream: every connected client receives every
//! prediction update, and a newly connected client is sent the most recent
//! snapshot immediately so the board renders without waiting for the next
//! poll.
//!
//! ## Example
//!
//! ```javascript
//! // Browser
//! const ws = new WebSocket('ws://localhost:9966/ws');
//!
//! ws.onmessage = (event) => {
//!   const msg = JSON.parse(event.data);
//!   if (msg.type === 'predictions') {
//!     renderBoard(msg.data);
//!   }
//! };
//! ```

mod handler;
mod hub;
mod messages;

pub use handler::websocket_handler;
pub use hub::{ConnectionHub, HubConfig, HubError};
pub use messages::{ClientMessage, ServerMessage};
