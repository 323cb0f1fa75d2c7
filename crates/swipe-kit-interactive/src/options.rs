//! Carousel construction options
//!
//! [`CarouselOptions`] mirrors the page bootstrap: every key is optional so a
//! forgotten key can be reported by name. [`CarouselOptions::validate`] turns
//! it into the immutable [`CarouselConfig`] the carousels run with.

use crate::error::CarouselError;
use swipe_kit::Selector;
use swipe_kit_macros::WithBuilders;

/// Options as supplied by the page
#[derive(Debug, Clone, Default, PartialEq, WithBuilders)]
pub struct CarouselOptions {
    /// Selector of each carousel mount point
    #[with_builders(into)]
    pub carousel_wrapper_selector: Option<String>,
    /// Selector of the clipping wrapper around the slide list
    #[with_builders(into)]
    pub slide_wrapper_selector: Option<String>,
    /// Selector of the moving slide list; its children are the slides
    #[with_builders(into)]
    pub slide_list_selector: Option<String>,
    /// Reserved
    #[with_builders(into)]
    pub nav_wrapper_class: Option<String>,
    /// Reserved
    #[with_builders(into)]
    pub nav_item_class: Option<String>,
    /// Reserved
    #[with_builders(into)]
    pub nav_item_active_class: Option<String>,
    /// Class shared by both nav buttons
    #[with_builders(into)]
    pub button_class: Option<String>,
    #[with_builders(into)]
    pub button_prev_class: Option<String>,
    #[with_builders(into)]
    pub button_prev_active_class: Option<String>,
    #[with_builders(into)]
    pub button_next_class: Option<String>,
    #[with_builders(into)]
    pub button_next_active_class: Option<String>,
    /// Slide animation duration in milliseconds
    pub animation_duration: Option<u32>,
    /// Fraction of the wrapper width a drag must cover to commit a swipe
    pub swipe_x_threshold_modifier: Option<f32>,
}

/// Classes accepted for a numbered nav; carried but not used by the carousel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavClasses {
    pub wrapper: Option<String>,
    pub item: Option<String>,
    pub item_active: Option<String>,
}

/// Validated carousel configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselConfig {
    pub carousel_wrapper: Selector,
    pub slide_wrapper: Selector,
    pub slide_list: Selector,
    pub button_class: String,
    pub button_prev_class: String,
    pub button_prev_active_class: String,
    pub button_next_class: String,
    pub button_next_active_class: String,
    pub animation_duration_ms: u32,
    pub swipe_threshold_modifier: f32,
    pub nav: NavClasses,
}

impl CarouselOptions {
    /// The conventional class names, 300 ms slides and a 30% swipe threshold
    pub fn standard() -> Self {
        Self::default()
            .with_carousel_wrapper_selector(".js-carousel")
            .with_slide_wrapper_selector(".js-carouselWrapper")
            .with_slide_list_selector(".js-carousel-list")
            .with_nav_wrapper_class("carousel-nav")
            .with_nav_item_class("carousel-nav-item")
            .with_nav_item_active_class("carousel-nav-item-is-active")
            .with_button_class("js-carousel-btn")
            .with_button_prev_class("js-carousel-btn-prev")
            .with_button_prev_active_class("carousel-btn-prev_isActive")
            .with_button_next_class("js-carousel-btn-next")
            .with_button_next_active_class("carousel-btn-next_isActive")
            .with_animation_duration(300)
            .with_swipe_x_threshold_modifier(0.3)
    }

    /// Check every required key, reporting the first one missing
    pub fn validate(&self) -> Result<CarouselConfig, CarouselError> {
        let carousel_wrapper =
            required_str(&self.carousel_wrapper_selector, "carouselWrapperSelector")?;
        let slide_wrapper = required_str(&self.slide_wrapper_selector, "slideWrapperSelector")?;
        let slide_list = required_str(&self.slide_list_selector, "slideListSelector")?;
        let button_class = required_str(&self.button_class, "buttonClass")?;
        let button_prev_class = required_str(&self.button_prev_class, "buttonPrevClass")?;
        let button_prev_active_class =
            required_str(&self.button_prev_active_class, "buttonPrevActiveClass")?;
        let button_next_class = required_str(&self.button_next_class, "buttonNextClass")?;
        let button_next_active_class =
            required_str(&self.button_next_active_class, "buttonNextActiveClass")?;
        let animation_duration_ms = self
            .animation_duration
            .ok_or(CarouselError::MissingOption("animationDuration"))?;
        let swipe_threshold_modifier = self
            .swipe_x_threshold_modifier
            .ok_or(CarouselError::MissingOption("swipeXThresholdModifier"))?;

        if !swipe_threshold_modifier.is_finite() || swipe_threshold_modifier < 0.0 {
            return Err(CarouselError::InvalidOption {
                option: "swipeXThresholdModifier",
                reason: format!("expected a non-negative fraction, got {swipe_threshold_modifier}"),
            });
        }

        Ok(CarouselConfig {
            carousel_wrapper: Selector::parse(carousel_wrapper),
            slide_wrapper: Selector::parse(slide_wrapper),
            slide_list: Selector::parse(slide_list),
            button_class: button_class.to_string(),
            button_prev_class: button_prev_class.to_string(),
            button_prev_active_class: button_prev_active_class.to_string(),
            button_next_class: button_next_class.to_string(),
            button_next_active_class: button_next_active_class.to_string(),
            animation_duration_ms,
            swipe_threshold_modifier,
            nav: NavClasses {
                wrapper: self.nav_wrapper_class.clone(),
                item: self.nav_item_class.clone(),
                item_active: self.nav_item_active_class.clone(),
            },
        })
    }
}

/// A required string option; empty strings count as missing
fn required_str<'a>(
    value: &'a Option<String>,
    name: &'static str,
) -> Result<&'a str, CarouselError> {
    match value.as_deref() {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(CarouselError::MissingOption(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_options_validate() {
        let config = CarouselOptions::standard().validate();
        let Ok(config) = config else {
            panic!("standard options should validate");
        };
        assert_eq!(config.carousel_wrapper, Selector::class("js-carousel"));
        assert_eq!(config.animation_duration_ms, 300);
        assert_eq!(config.swipe_threshold_modifier, 0.3);
        assert_eq!(config.nav.item.as_deref(), Some("carousel-nav-item"));
    }

    #[test]
    fn test_missing_option_is_named() {
        let mut options = CarouselOptions::standard();
        options.button_next_class = None;
        assert_eq!(
            options.validate(),
            Err(CarouselError::MissingOption("buttonNextClass"))
        );

        let options = CarouselOptions::default();
        assert_eq!(
            options.validate(),
            Err(CarouselError::MissingOption("carouselWrapperSelector"))
        );
    }

    #[test]
    fn test_empty_string_counts_as_missing() {
        let options = CarouselOptions::standard().with_slide_list_selector("");
        assert_eq!(
            options.validate(),
            Err(CarouselError::MissingOption("slideListSelector"))
        );
    }

    #[test]
    fn test_zero_duration_is_allowed() {
        let options = CarouselOptions::standard().with_animation_duration(0);
        assert_eq!(options.validate().map(|c| c.animation_duration_ms), Ok(0));
    }

    #[test]
    fn test_nav_classes_are_optional() {
        let mut options = CarouselOptions::standard();
        options.nav_wrapper_class = None;
        options.nav_item_class = None;
        options.nav_item_active_class = None;
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_invalid_threshold_modifier() {
        let options = CarouselOptions::standard().with_swipe_x_threshold_modifier(f32::NAN);
        assert!(matches!(
            options.validate(),
            Err(CarouselError::InvalidOption {
                option: "swipeXThresholdModifier",
                ..
            })
        ));
    }
}
