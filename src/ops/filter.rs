// ============================================================================
// SVG FILTER — feImage + feDisplacementMap markup for a displacement map
// ============================================================================

/// Build the hidden `<svg>` holding a filter that warps `SourceGraphic` by the
/// map at `map_href`. R drives X, G drives Y, both scaled by `refraction_scale`.
pub fn svg_filter(
    filter_id: &str,
    width: u32,
    height: u32,
    map_href: &str,
    refraction_scale: f64,
) -> String {
    let id = escape_attr(filter_id);
    let href = escape_attr(map_href);
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"0\" height=\"0\" \
         style=\"position: absolute; top: -9999px; left: -9999px;\">\n\
         \x20 <filter id=\"{id}\" filterUnits=\"userSpaceOnUse\" x=\"0\" y=\"0\" \
         width=\"{width}\" height=\"{height}\" color-interpolation-filters=\"sRGB\">\n\
         \x20   <feImage href=\"{href}\" result=\"displacement_map\"/>\n\
         \x20   <feDisplacementMap in=\"SourceGraphic\" in2=\"displacement_map\" \
         scale=\"{refraction_scale}\" xChannelSelector=\"R\" yChannelSelector=\"G\"/>\n\
         \x20 </filter>\n\
         </svg>\n"
    )
}

fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
