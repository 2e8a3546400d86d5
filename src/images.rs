//! Image CDN URLs

use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Widths used by [`ImageCdn::default_src_set`].
pub const DEFAULT_SRC_SET_WIDTHS: [u32; 5] = [640, 768, 1024, 1280, 1536];

/// Placeholder color used by [`blur_data_url`] callers with no better choice.
pub const DEFAULT_BLUR_COLOR: &str = "#f3f4f6";

/// Bytes escaped inside a data URL attribute value. Matches
/// `encodeURIComponent`, except `'` stays escaped since it delimits the value.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'(')
    .remove(b')');

/// Output format requested from the CDN.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageFormat {
    /// Let the CDN negotiate
    #[default]
    Auto,

    /// `WebP`
    Webp,

    /// AVIF
    Avif,

    /// JPEG
    Jpg,

    /// PNG
    Png,
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ImageFormat::Auto => "auto",
            ImageFormat::Webp => "webp",
            ImageFormat::Avif => "avif",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Png => "png",
        })
    }
}

/// How the image is fitted to the requested dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFit {
    /// Scale
    Scale,

    /// Fit
    Fit,

    /// Fill
    Fill,

    /// Crop
    Crop,

    /// Pad
    Pad,
}

impl fmt::Display for ImageFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ImageFit::Scale => "scale",
            ImageFit::Fit => "fit",
            ImageFit::Fill => "fill",
            ImageFit::Crop => "crop",
            ImageFit::Pad => "pad",
        })
    }
}

/// Transformations applied by [`ImageCdn::optimized_url`].
///
/// Quality and format default to `auto`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageTransform {
    /// Target width in pixels
    pub width: Option<u32>,

    /// Target height in pixels
    pub height: Option<u32>,

    /// Quality from 1 to 100
    pub quality: Option<u8>,

    /// Output format
    pub format: ImageFormat,

    /// Fit mode
    pub fit: Option<ImageFit>,
}

impl ImageTransform {
    /// Transform with only a width set.
    pub fn width(width: u32) -> Self {
        Self {
            width: Some(width),
            ..Self::default()
        }
    }

    fn directives(&self) -> Vec<String> {
        let quality = self
            .quality
            .filter(|quality| *quality > 0)
            .map_or_else(|| "auto".to_string(), |quality| quality.to_string());

        let mut directives = vec![format!("q_{quality}"), format!("f_{}", self.format)];

        if let Some(width) = self.width.filter(|width| *width > 0) {
            directives.push(format!("w_{width}"));
        }

        if let Some(height) = self.height.filter(|height| *height > 0) {
            directives.push(format!("h_{height}"));
        }

        if let Some(fit) = self.fit {
            directives.push(format!("c_{fit}"));
        }

        directives
    }
}

/// `sizes` attribute values per breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizesConfig<'a> {
    /// Up to 640px
    pub mobile: &'a str,

    /// Up to 1024px
    pub tablet: &'a str,

    /// Wider screens
    pub desktop: &'a str,
}

impl Default for SizesConfig<'_> {
    fn default() -> Self {
        Self {
            mobile: "100vw",
            tablet: "50vw",
            desktop: "33vw",
        }
    }
}

/// Builds delivery URLs for one cloud account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCdn {
    cloud_name: String,
}

impl ImageCdn {
    /// Create a URL builder for `cloud_name`.
    pub fn new(cloud_name: impl Into<String>) -> Self {
        Self {
            cloud_name: cloud_name.into(),
        }
    }

    /// Returns the cloud name.
    pub fn cloud_name(&self) -> &str {
        &self.cloud_name
    }

    /// Delivery URL with raw `key_value` transformations in the given order.
    pub fn url<V: fmt::Display>(&self, public_id: &str, options: &[(&str, V)]) -> String {
        let directives: Vec<String> = options
            .iter()
            .map(|(key, value)| format!("{key}_{value}"))
            .collect();

        self.build(public_id, &directives)
    }

    /// Delivery URL with quality, format and sizing applied.
    pub fn optimized_url(&self, public_id: &str, transform: &ImageTransform) -> String {
        self.build(public_id, &transform.directives())
    }

    /// `srcset` attribute value with one optimized URL per width.
    pub fn src_set(&self, public_id: &str, widths: &[u32]) -> String {
        widths
            .iter()
            .map(|width| {
                let url = self.optimized_url(public_id, &ImageTransform::width(*width));
                format!("{url} {width}w")
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// [`src_set`](Self::src_set) over [`DEFAULT_SRC_SET_WIDTHS`].
    pub fn default_src_set(&self, public_id: &str) -> String {
        self.src_set(public_id, &DEFAULT_SRC_SET_WIDTHS)
    }

    fn build(&self, public_id: &str, directives: &[String]) -> String {
        let base = format!("https://res.cloudinary.com/{}/image/upload", self.cloud_name);

        if directives.is_empty() {
            format!("{base}/{public_id}")
        } else {
            format!("{base}/{}/{public_id}", directives.join(","))
        }
    }
}

/// `sizes` attribute value for the three breakpoints.
pub fn sizes(config: SizesConfig<'_>) -> String {
    format!(
        "(max-width: 640px) {}, (max-width: 1024px) {}, {}",
        config.mobile, config.tablet, config.desktop
    )
}

/// Inline SVG data URL of a blurred rectangle in `color`, used as a loading
/// placeholder.
pub fn blur_data_url(color: &str) -> String {
    let color = utf8_percent_encode(color, COMPONENT).to_string();

    format!(
        "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 8 5'%3E\
         %3Cfilter id='b' color-interpolation-filters='sRGB'%3E\
         %3CfeGaussianBlur stdDeviation='1'/%3E%3C/filter%3E\
         %3Crect width='100%25' height='100%25' fill='{color}' filter='url(%23b)'/%3E%3C/svg%3E"
    )
}
