//! Site map
//!
//! Built once at startup: one marker group per site type, hover shows the
//! site name, centered on the mean coordinate of the located sites.

use super::figure::{
    palette_color, ChartSpec, LatLon, Layout, Legend, MapTrace, Mapbox, Marker, Text, Trace,
};
use crate::registry::SiteRegistry;

/// Fallback center when no site has coordinates (Canberra)
const DEFAULT_CENTER: LatLon = LatLon {
    lat: -35.28,
    lon: 149.13,
};

pub struct MapOptions<'a> {
    pub access_token: Option<&'a str>,
    pub height: u32,
    pub zoom: f64,
}

pub fn site_map(registry: &SiteRegistry, options: &MapOptions<'_>) -> ChartSpec {
    let mut layout = Layout::titled("", options.height);
    layout.legend = Some(Legend {
        orientation: "v",
        title: Text::new("type"),
    });
    layout.mapbox = Some(Mapbox {
        accesstoken: options.access_token.map(str::to_string),
        // Token-less rendering needs a style that does not require one
        style: if options.access_token.is_some() {
            "basic"
        } else {
            "open-street-map"
        },
        center: center_of(registry),
        zoom: options.zoom,
    });

    let mut chart = ChartSpec::new(layout);
    chart.data = registry
        .types()
        .into_iter()
        .enumerate()
        .map(|(idx, site_type)| {
            let sites: Vec<_> = registry.of_type(site_type).collect();
            Trace::Scattermapbox(MapTrace {
                name: site_type.to_string(),
                mode: "markers",
                legendgroup: site_type.to_string(),
                lat: sites.iter().map(|s| s.latitude).collect(),
                lon: sites.iter().map(|s| s.longitude).collect(),
                hovertext: sites.iter().map(|s| s.name.clone()).collect(),
                marker: Marker {
                    color: palette_color(idx),
                },
            })
        })
        .collect();
    chart
}

fn center_of(registry: &SiteRegistry) -> LatLon {
    let coords: Vec<(f64, f64)> = registry.iter().filter_map(|s| s.coordinates()).collect();
    if coords.is_empty() {
        return DEFAULT_CENTER;
    }

    let n = coords.len() as f64;
    LatLon {
        lat: coords.iter().map(|(lat, _)| lat).sum::<f64>() / n,
        lon: coords.iter().map(|(_, lon)| lon).sum::<f64>() / n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Site;

    fn registry() -> SiteRegistry {
        SiteRegistry::new(vec![
            Site::new("410001", "Murrumbidgee").at(-35.0, 149.0),
            Site::new("570946", "Tuggeranong").at(-36.0, 150.0),
            Site::new("410002", "Cotter"),
        ])
    }

    fn options(token: Option<&str>) -> MapOptions<'_> {
        MapOptions {
            access_token: token,
            height: 800,
            zoom: 8.0,
        }
    }

    #[test]
    fn test_one_trace_per_type() {
        let chart = site_map(&registry(), &options(Some("pk.test")));
        let traces: Vec<&MapTrace> = chart.markers().collect();

        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0].name, "410");
        assert_eq!(traces[0].hovertext, vec!["Murrumbidgee", "Cotter"]);
        assert_eq!(traces[0].lat, vec![Some(-35.0), None]);
        assert_ne!(traces[0].marker.color, traces[1].marker.color);
        assert_eq!(chart.layout.height, 800);
    }

    #[test]
    fn test_center_is_mean_of_located_sites() {
        let chart = site_map(&registry(), &options(None));
        let mapbox = chart.layout.mapbox.unwrap();
        assert_eq!(mapbox.center, LatLon { lat: -35.5, lon: 149.5 });
        assert_eq!(mapbox.style, "open-street-map");
        assert!(mapbox.accesstoken.is_none());
    }

    #[test]
    fn test_empty_registry_uses_default_center() {
        let chart = site_map(&SiteRegistry::default(), &options(Some("pk.test")));
        assert!(chart.data.is_empty());
        assert_eq!(chart.layout.mapbox.unwrap().center, DEFAULT_CENTER);
    }
}
