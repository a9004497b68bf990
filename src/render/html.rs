//! Self-contained HTML document for a [`MapArtifact`].

use crate::constants::render::LEAFLET_VERSION;
use crate::error::{Error, Result};
use crate::render::MapArtifact;

const SCRIPT: &str = r"
(function () {
  var data = JSON.parse(document.getElementById('map-data').textContent);
  var map = L.map('map').setView(data.view.center, data.view.zoom);
  L.tileLayer(data.tiles.url, { attribution: data.tiles.attribution, maxZoom: 20 }).addTo(map);

  data.route.forEach(function (seg) {
    L.polyline([seg.from, seg.to], {
      color: seg.color, weight: seg.weight, opacity: seg.opacity
    }).addTo(map);
  });

  function popupContent(popup) {
    var root = document.createElement('div');
    root.className = 'photo-popup';
    if (popup.thumbnail) {
      var img = document.createElement('img');
      img.src = popup.thumbnail;
      img.alt = popup.filename;
      root.appendChild(img);
    } else {
      var placeholder = document.createElement('div');
      placeholder.className = 'no-preview';
      placeholder.textContent = 'No preview';
      root.appendChild(placeholder);
    }
    var name = document.createElement('div');
    name.className = 'filename';
    name.textContent = popup.filename;
    root.appendChild(name);
    var scene = document.createElement('div');
    scene.className = 'scene';
    scene.textContent = popup.text;
    root.appendChild(scene);
    return root;
  }

  data.markers.forEach(function (m) {
    m.aura.forEach(function (ring) {
      L.circleMarker(m.position, {
        radius: ring.radius, stroke: false, fillColor: m.color,
        fillOpacity: ring.opacity, interactive: false
      }).addTo(map);
    });
    var icon = L.divIcon({
      html: m.pin.svg, className: 'photo-pin',
      iconSize: m.pin.size, iconAnchor: m.pin.anchor,
      popupAnchor: [0, -m.pin.size[1]]
    });
    L.marker(m.position, { icon: icon })
      .bindPopup(function () { return popupContent(m.popup); }, { maxWidth: 260 })
      .addTo(map);
  });

  if (data.legend) {
    var legend = L.control({ position: 'bottomright' });
    legend.onAdd = function () {
      var box = L.DomUtil.create('div', 'legend');
      var caption = L.DomUtil.create('div', 'caption', box);
      caption.textContent = data.legend.caption;
      var bar = L.DomUtil.create('div', 'bar', box);
      bar.style.background = 'linear-gradient(to right, ' + data.legend.colors.join(', ') + ')';
      var scale = L.DomUtil.create('div', 'scale', box);
      var lo = L.DomUtil.create('span', '', scale);
      lo.textContent = data.legend.min;
      var hi = L.DomUtil.create('span', '', scale);
      hi.textContent = data.legend.max;
      return box;
    };
    legend.addTo(map);
  }
})();
";

const STYLE: &str = "
html, body, #map { height: 100%; margin: 0; }
.photo-pin { background: none; border: none; }
.photo-popup img { display: block; max-width: 240px; border-radius: 4px; }
.photo-popup .no-preview { width: 200px; padding: 40px 0; text-align: center; background: #eee; color: #777; }
.photo-popup .filename { margin-top: 6px; font-weight: bold; }
.legend { background: #fff; padding: 6px 8px; border-radius: 4px; font: 12px sans-serif; box-shadow: 0 0 4px rgba(0,0,0,.3); }
.legend .bar { width: 180px; height: 10px; margin: 4px 0; }
.legend .scale { display: flex; justify-content: space-between; }
";

impl MapArtifact {
    /// Serialize the layer model to JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::MapSerialize { source: e })
    }

    /// Render a standalone HTML page drawing this map with Leaflet.
    ///
    /// The model is embedded as JSON in a data block; `<` is written as
    /// `\u003c` so no payload can close the surrounding script element.
    pub fn to_html(&self) -> Result<String> {
        let json = self.to_json()?.replace('<', "\\u003c");
        let leaflet = format!("https://unpkg.com/leaflet@{LEAFLET_VERSION}/dist/leaflet");

        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>runview</title>
<link rel="stylesheet" href="{leaflet}.css">
<script src="{leaflet}.js"></script>
<style>{STYLE}</style>
</head>
<body>
<div id="map"></div>
<script type="application/json" id="map-data">{json}</script>
<script>{SCRIPT}</script>
</body>
</html>
"#
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::color::HexColor;
    use crate::config::RenderConfig;
    use crate::pipeline::PhotoRecord;
    use crate::render::MapRenderer;
    use crate::scene::ScenePrediction;
    use crate::track::TrackPoint;
    use std::path::PathBuf;

    fn hostile_photo() -> PhotoRecord {
        PhotoRecord {
            filename: "</script><script>alert(1)</script>.jpg".to_string(),
            filepath: PathBuf::from("x.jpg"),
            latitude: 37.5,
            longitude: 127.0,
            timestamp: None,
            captured_at: None,
            prediction: ScenePrediction {
                color: HexColor::new(255, 0, 0),
                label: "<b>Red</b>".to_string(),
                confidence: 0.5,
            },
            track_index: 0,
            thumbnail: None,
        }
    }

    #[test]
    fn test_html_embeds_data_and_leaflet() {
        let renderer = MapRenderer::new(RenderConfig::default()).unwrap();
        let track = vec![TrackPoint::new(37.5, 127.0), TrackPoint::new(37.6, 127.1)];
        let html = renderer.render(&track, &[]).to_html().unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("leaflet@1.9.4/dist/leaflet.js"));
        assert!(html.contains(r#"id="map-data""#));
        assert!(html.contains("\"zoom\":15"));
        assert!(html.contains("#808080"));
    }

    #[test]
    fn test_html_escapes_script_breakout() {
        let renderer = MapRenderer::new(RenderConfig::default()).unwrap();
        let html = renderer.render(&[], &[hostile_photo()]).to_html().unwrap();

        assert!(!html.contains("</script><script>alert"));
        assert!(!html.contains("<b>Red</b>"));
        assert!(html.contains("\\u003c/script>"));
        // exactly the page's own closing tags
        assert_eq!(html.matches("</script>").count(), 3);
    }

    #[test]
    fn test_json_round_trips_through_serde() {
        let renderer = MapRenderer::new(RenderConfig::default()).unwrap();
        let json = renderer.render(&[], &[hostile_photo()]).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["markers"][0]["popup"]["text"], "<b>Red</b> (50%)");
        assert!(value["legend"].is_null());
        assert_eq!(value["markers"][0]["aura"].as_array().unwrap().len(), 6);
    }
}
