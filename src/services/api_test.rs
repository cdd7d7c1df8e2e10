use super::*;

// =============================================================================
// Search params
// =============================================================================

#[test]
fn default_query_sends_only_first_page() {
    let params = SearchQuery::default().params();
    assert_eq!(params, vec![("page", "1".to_owned())]);
}

#[test]
fn full_query_builds_all_params() {
    let query = SearchQuery {
        search: Some("coffee".into()),
        page: Some(3),
        state: Some("Karnataka".into()),
        max_investment: Some(50),
    };
    assert_eq!(
        query.params(),
        vec![
            ("search", "coffee".to_owned()),
            ("page", "3".to_owned()),
            ("state", "Karnataka".to_owned()),
            ("minInvestment", "0".to_owned()),
            ("maxInvestment", "50".to_owned()),
        ]
    );
}

#[test]
fn all_state_sentinel_is_not_a_filter() {
    let query = SearchQuery { state: Some("All".into()), ..SearchQuery::default() };
    assert_eq!(query.params(), vec![("page", "1".to_owned())]);
}

#[test]
fn empty_search_text_is_dropped() {
    let query = SearchQuery { search: Some(String::new()), ..SearchQuery::default() };
    assert_eq!(query.params(), vec![("page", "1".to_owned())]);
}

#[test]
fn investment_ceiling_implies_zero_floor() {
    let query = SearchQuery { max_investment: Some(120), ..SearchQuery::default() };
    let params = query.params();
    assert!(params.contains(&("minInvestment", "0".to_owned())));
    assert!(params.contains(&("maxInvestment", "120".to_owned())));
}

// =============================================================================
// Image rules
// =============================================================================

fn png(name: &str, len: usize) -> ImageUpload {
    ImageUpload { file_name: name.into(), content_type: "image/png".into(), bytes: vec![0; len] }
}

#[test]
fn one_to_three_images_pass() {
    for count in 1..=MAX_LISTING_IMAGES {
        let images: Vec<_> = (0..count).map(|i| png(&format!("{i}.png"), 1024)).collect();
        assert!(check_images(&images).is_ok(), "{count} images");
    }
}

#[test]
fn zero_images_rejected() {
    assert_eq!(check_images(&[]), Err(ImageRuleError::NoImages));
}

#[test]
fn four_images_rejected() {
    let images: Vec<_> = (0..4).map(|i| png(&format!("{i}.png"), 16)).collect();
    assert_eq!(check_images(&images), Err(ImageRuleError::TooMany));
}

#[test]
fn oversized_image_rejected() {
    let images = vec![png("ok.png", 16), png("big.png", MAX_IMAGE_BYTES + 1)];
    assert_eq!(check_images(&images), Err(ImageRuleError::TooLarge("big.png".into())));
}

#[test]
fn image_at_limit_passes() {
    assert!(check_images(&[png("edge.png", MAX_IMAGE_BYTES)]).is_ok());
}

#[test]
fn non_image_part_rejected() {
    let doc = ImageUpload {
        file_name: "contract.pdf".into(),
        content_type: "application/pdf".into(),
        bytes: vec![0; 16],
    };
    assert_eq!(check_images(&[doc]), Err(ImageRuleError::NotAnImage("contract.pdf".into())));
}

// =============================================================================
// Wire types
// =============================================================================

#[test]
fn franchise_page_decodes_backend_shape() {
    let json = r#"{
        "result": [
            {"id": "f-1", "brandName": "Bean There", "category": "Food", "imageUrl": "https://cdn/x.png"},
            {"id": "f-2", "brandName": "Gym Co", "website": "https://gym.example", "category": "Fitness", "imageUrl": "https://cdn/y.png"}
        ],
        "totalPages": 7
    }"#;
    let page: FranchisePage = serde_json::from_str(json).unwrap();
    assert_eq!(page.total_pages, 7);
    assert_eq!(page.result.len(), 2);
    assert_eq!(page.result[0].brand_name, "Bean There");
    assert_eq!(page.result[0].website, None);
    assert_eq!(page.result[1].website.as_deref(), Some("https://gym.example"));
}

#[test]
fn dashboard_summary_decodes_backend_shape() {
    let json = r#"{
        "franchiseId": "f-9", "franchiseName": "Bean There", "status": "Approved",
        "totalViews": 1543, "avgViewsPerDay": 12.4, "performanceLevel": "High",
        "yearEstablished": 2015, "totalLocations": 24, "investmentRange": "10L - 50L",
        "spaceRequiredSqFt": 400, "statesCount": 3, "photosCount": 3,
        "createdAt": "2025-01-12T08:00:00Z", "approvedAt": null,
        "daysLive": 120, "isApproved": true
    }"#;
    let summary: FranchiseDashboard = serde_json::from_str(json).unwrap();
    assert_eq!(summary.total_views, 1543);
    assert_eq!(summary.performance_level, "High");
    assert_eq!(summary.approved_at, None);
    assert!(summary.is_approved);
}

// =============================================================================
// Client
// =============================================================================

#[test]
fn base_url_trailing_slash_is_trimmed() {
    let client = ApiClient::new("http://localhost:5151/").unwrap();
    assert_eq!(client.url("/api/auth/login"), "http://localhost:5151/api/auth/login");
}

#[test]
fn url_joins_paths_verbatim() {
    let client = ApiClient::new("https://api.example.com").unwrap();
    assert_eq!(client.url("/api/franchise/f-1"), "https://api.example.com/api/franchise/f-1");
}
