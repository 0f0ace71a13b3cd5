/// Built-in query text (the abstract of the 2009–2010 IEEE GRSS Data Fusion
/// Contest outcome paper on flooded-area detection)
pub const SAMPLE_TEXT: &str = "Multi-Modal Change Detection, Application to the Detection of Flooded Areas: Outcome of the 2009–2010 Data Fusion Contest。 The 2009-2010 Data Fusion Contest organized by the Data Fusion Technical Committee of the IEEE Geoscience and Remote Sensing Society was focused on the detection of flooded areas using multi-temporal and multi-modal images. Both high spatial resolution optical and synthetic aperture radar data were provided. The goal was not only to identify the best algorithms (in terms of accuracy), but also to investigate the further improvement derived from decision fusion. This paper presents the four awarded algorithms and the conclusions of the contest, investigating both supervised and unsupervised methods and the use of multi-modal data for flood detection. Interestingly, a simple unsupervised change detection method provided similar accuracy as supervised approaches, and a digital elevation model-based predictive method yielded a comparable projected change detection map without using post-event data.";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::text::preprocess;

    #[test]
    fn test_sample_text_tokens() {
        let tokens = preprocess(SAMPLE_TEXT);
        assert_eq!(&tokens[..3], &["multimodal", "change", "detection"]);
        assert!(tokens.contains(&"flooded".to_string()));
        assert!(!tokens.contains(&"the".to_string()));
    }
}
