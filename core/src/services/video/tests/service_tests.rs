//! Generation planning, cost gating, and history tests

use std::sync::Arc;

use super::mocks::MockVideoBackend;
use crate::domain::entities::template::{PREMIUM_TEMPLATE_COST, STANDARD_GENERATION_COST};
use crate::errors::{ValidationError, VideoError};
use crate::services::video::{
    AttachedImage, GenerationInput, GenerationMode, GenerationPlan, VideoService,
};
use vd_shared::config::VideoServiceConfig;

type Service = VideoService<MockVideoBackend>;

fn service(backend: MockVideoBackend) -> (Service, Arc<MockVideoBackend>) {
    let backend = Arc::new(backend);
    (
        VideoService::new(backend.clone(), VideoServiceConfig::default()),
        backend,
    )
}

fn inline_image() -> AttachedImage {
    AttachedImage::Inline(String::from("base64data"))
}

#[test]
fn no_image_means_text_only_even_with_a_template_selected() {
    let input = GenerationInput {
        prompt: String::from("a fox in the snow"),
        image: None,
        template_id: Some(String::from("dance1")),
        ..Default::default()
    };

    let plan = Service::plan_generation(&input).unwrap();
    assert_eq!(
        plan.mode,
        GenerationMode::TextOnly {
            prompt: String::from("a fox in the snow")
        }
    );
    assert_eq!(plan.coin_cost, STANDARD_GENERATION_COST);
}

#[test]
fn text_only_requires_a_prompt() {
    let input = GenerationInput {
        prompt: String::from("   "),
        ..Default::default()
    };
    assert_eq!(
        Service::plan_generation(&input),
        Err(ValidationError::EmptyPrompt)
    );
}

#[test]
fn premium_template_costs_more_and_drops_the_prompt() {
    let input = GenerationInput {
        prompt: String::from("ignored in template mode"),
        image: Some(inline_image()),
        template_id: Some(String::from("money")),
        ..Default::default()
    };

    let plan = Service::plan_generation(&input).unwrap();
    assert_eq!(plan.coin_cost, PREMIUM_TEMPLATE_COST);
    assert!(matches!(plan.mode, GenerationMode::Template { .. }));
}

#[test]
fn unlisted_template_costs_the_standard_rate() {
    let input = GenerationInput {
        image: Some(inline_image()),
        template_id: Some(String::from("wave")),
        ..Default::default()
    };

    let plan = Service::plan_generation(&input).unwrap();
    assert_eq!(plan.coin_cost, STANDARD_GENERATION_COST);
}

#[test]
fn image_without_template_keeps_the_prompt() {
    let input = GenerationInput {
        prompt: String::from("make it rain"),
        image: Some(inline_image()),
        template_id: None,
        ..Default::default()
    };

    let plan = Service::plan_generation(&input).unwrap();
    assert_eq!(
        plan.mode,
        GenerationMode::ImagePrompt {
            image: inline_image(),
            prompt: String::from("make it rain")
        }
    );
    assert_eq!(plan.coin_cost, STANDARD_GENERATION_COST);
}

#[test]
fn balance_gate() {
    let plan = GenerationPlan {
        mode: GenerationMode::Template {
            image: inline_image(),
            template_id: String::from("kiss"),
        },
        coin_cost: PREMIUM_TEMPLATE_COST,
        negative_prompt: None,
        size: None,
    };

    assert_eq!(
        Service::ensure_affordable(&plan, 54),
        Err(VideoError::InsufficientCoins {
            required: 55,
            balance: 54
        })
    );
    assert!(Service::ensure_affordable(&plan, 55).is_ok());
}

#[tokio::test]
async fn template_mode_sends_template_and_no_prompt() {
    let (service, backend) = service(MockVideoBackend::new());

    let plan = Service::plan_generation(&GenerationInput {
        prompt: String::from("cleared"),
        image: Some(inline_image()),
        template_id: Some(String::from("dance2")),
        ..Default::default()
    })
    .unwrap();
    service.submit_generation("user_42", &plan).await.unwrap();

    let request = backend.last_create_call();
    assert_eq!(request.uid, "user_42");
    assert_eq!(request.template.as_deref(), Some("dance2"));
    assert_eq!(request.prompt_text, None);
    assert_eq!(request.image.as_deref(), Some("base64data"));
    assert_eq!(request.image_url, None);
}

#[tokio::test]
async fn remote_image_goes_out_as_image_url() {
    let (service, backend) = service(MockVideoBackend::new());

    let plan = Service::plan_generation(&GenerationInput {
        prompt: String::from("make it rain"),
        image: Some(AttachedImage::Remote(String::from(
            "https://cdn.example.com/upload.png",
        ))),
        ..Default::default()
    })
    .unwrap();
    service.submit_generation("user_42", &plan).await.unwrap();

    let request = backend.last_create_call();
    assert_eq!(request.image, None);
    assert_eq!(
        request.image_url.as_deref(),
        Some("https://cdn.example.com/upload.png")
    );
    assert_eq!(request.prompt_text.as_deref(), Some("make it rain"));
}

#[tokio::test]
async fn full_history_page_indicates_more() {
    let (service, backend) = service(MockVideoBackend::with_history_items(10));

    let page = service.history_page("user_42", 1).await.unwrap();
    assert_eq!(page.items.len(), 10);
    assert!(page.has_more);

    let requests = backend.history_calls.lock().unwrap();
    assert_eq!(requests[0].page, 1);
    assert_eq!(requests[0].items_per_page, 10);
}

#[tokio::test]
async fn short_history_page_ends_the_listing() {
    let (service, _backend) = service(MockVideoBackend::with_history_items(4));

    let page = service.history_page("user_42", 3).await.unwrap();
    assert_eq!(page.items.len(), 4);
    assert!(!page.has_more);
    assert_eq!(page.page, 3);
}

#[tokio::test]
async fn remove_video_reaches_the_backend() {
    let (service, backend) = service(MockVideoBackend::new());

    service.remove_video("user_42", "vid_9").await.unwrap();
    assert_eq!(*backend.removed.lock().unwrap(), vec![String::from("vid_9")]);
}
