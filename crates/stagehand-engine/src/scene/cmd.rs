use crate::scene::shapes::text::TextCmd;
use crate::scene::shapes::texture::TextureCmd;

/// Renderer-agnostic draw command.
///
/// Extending the stream:
/// - add a payload module under `scene::shapes::*`
/// - add a new variant here
/// - teach backends to consume it
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Texture(TextureCmd),
    Text(TextCmd),
}
