// LogPane - ui/follow.rs
//
// Auto-follow policy for the log list: after new entries arrive, scroll to
// the bottom only if the view was already at (or within `tolerance` of) the
// bottom. The comparison is inclusive at the boundary.

/// True when the viewport's bottom edge is within `tolerance` of the end of
/// the content. Content that fits entirely inside the viewport counts as
/// being at the bottom.
pub fn is_near_bottom(offset: f32, viewport_height: f32, content_height: f32, tolerance: f32) -> bool {
    if content_height <= viewport_height {
        return true;
    }
    offset + viewport_height >= content_height - tolerance
}
