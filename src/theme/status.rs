// Status classifier - connection status label to display color
//
// Total over all strings: the ten known TCP states get fixed colors,
// everything else falls into the default bucket.

use ratatui::style::Color;

use crate::net::ConnectionState;

/// Color for statuses outside the known set
pub const DEFAULT_STATUS_COLOR: Color = Color::Rgb(0x88, 0x88, 0x88);

/// Fixed color for a connection state
///
/// FIN_WAIT1 and FIN_WAIT2 share a color.
pub fn state_color(state: ConnectionState) -> Color {
    match state {
        ConnectionState::Established => Color::Rgb(0x00, 0xff, 0x00),
        ConnectionState::Listen => Color::Rgb(0x00, 0x00, 0xff),
        ConnectionState::CloseWait => Color::Rgb(0xff, 0x00, 0x00),
        ConnectionState::SynSent => Color::Rgb(0xff, 0xff, 0x00),
        ConnectionState::SynRecv => Color::Rgb(0xff, 0x00, 0xff),
        ConnectionState::FinWait1 | ConnectionState::FinWait2 => Color::Rgb(0x00, 0xff, 0xff),
        ConnectionState::TimeWait => Color::Rgb(0xff, 0xa5, 0x00),
        ConnectionState::Closing => Color::Rgb(0x8b, 0x00, 0xff),
        ConnectionState::LastAck => Color::Rgb(0x00, 0x8b, 0x8b),
        ConnectionState::Unknown => DEFAULT_STATUS_COLOR,
    }
}

/// Color for a raw status label
pub fn status_color(status: &str) -> Color {
    state_color(ConnectionState::from_label(status))
}
