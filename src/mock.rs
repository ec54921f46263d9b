use crate::models::{
    BarterProposal, Property, PropertyId, PropertyStatus, PropertyType, ProposalId, ProposalStatus, User,
    UserId, VerificationStatus,
};
use chrono::{Duration, Utc};
use tracing::info;

/// User the demo acts as
pub const CURRENT_USER: &str = "user-1";

/// Bare available listing with placeholder details
pub fn fixture(id: &str, owner: &str, city: &str, property_type: PropertyType) -> Property {
    Property {
        id: PropertyId::from(id),
        title: format!("{} {}", property_type, city),
        description: String::new(),
        owner: UserId::from(owner),
        property_type,
        address: String::new(),
        city: city.to_string(),
        area: 100.0,
        rooms: 2,
        year_built: 1398,
        images: vec![format!("https://picsum.photos/seed/{}/800/600", id)],
        estimated_value: 1_000_000_000,
        status: PropertyStatus::Available,
        barter_preferences: Vec::new(),
        verification_status: Some(VerificationStatus::Unverified),
        listed_at: Utc::now(),
    }
}

pub fn users() -> Vec<User> {
    [
        ("user-1", "علی رضایی", "تهران"),
        ("user-2", "مریم احمدی", "شیراز"),
        ("user-3", "رضا محمدی", "مشهد"),
        ("user-4", "سارا کریمی", "یزد"),
    ]
    .into_iter()
    .map(|(id, name, city)| User {
        id: UserId::from(id),
        name: name.to_string(),
        profile_picture: Some(format!("https://i.pravatar.cc/150?u={}", id)),
        city: Some(city.to_string()),
    })
    .collect()
}

/// Sample listings spread over the supported cities
pub fn properties() -> Vec<Property> {
    info!("📋 Generating mock listings");

    let now = Utc::now();
    let listing = |id: &str, owner: &str, city: &str, property_type: PropertyType, days_ago: i64| Property {
        listed_at: now - Duration::days(days_ago),
        ..fixture(id, owner, city, property_type)
    };

    vec![
        Property {
            title: "آپارتمان نوساز در سعادت آباد".to_string(),
            description: "آپارتمان ۳ خوابه با نورگیر عالی، پارکینگ و انباری.".to_string(),
            address: "تهران، سعادت آباد، بلوار پاکنژاد".to_string(),
            area: 145.0,
            rooms: 3,
            year_built: 1400,
            estimated_value: 25_000_000_000,
            barter_preferences: vec!["ویلا در شمال".to_string(), "زمین".to_string()],
            verification_status: Some(VerificationStatus::Verified),
            ..listing("prop-1", "user-1", "تهران", PropertyType::Apartment, 30)
        },
        Property {
            title: "ویلا باغ در شمال شیراز".to_string(),
            description: "ویلا با باغ مرکبات و استخر، مناسب سکونت دائم.".to_string(),
            address: "شیراز، قصرالدشت".to_string(),
            area: 600.0,
            rooms: 4,
            year_built: 1392,
            estimated_value: 18_000_000_000,
            barter_preferences: vec!["آپارتمان در تهران".to_string()],
            ..listing("prop-2", "user-2", "شیراز", PropertyType::Villa, 25)
        },
        Property {
            title: "زمین کشاورزی در حاشیه مشهد".to_string(),
            description: "زمین با سند تک برگ و چاه آب مجاز.".to_string(),
            address: "مشهد، جاده طرقبه".to_string(),
            area: 2_000.0,
            rooms: 0,
            year_built: 1390,
            estimated_value: 4_500_000_000,
            barter_preferences: vec!["خودرو".to_string(), "آپارتمان".to_string()],
            verification_status: Some(VerificationStatus::Pending),
            ..listing("prop-3", "user-3", "مشهد", PropertyType::Land, 20)
        },
        Property {
            title: "مغازه تجاری در بازار یزد".to_string(),
            description: "مغازه دو دهنه در راسته اصلی بازار.".to_string(),
            address: "یزد، بازار خان".to_string(),
            area: 40.0,
            rooms: 1,
            year_built: 1385,
            estimated_value: 850_000_000,
            ..listing("prop-4", "user-4", "یزد", PropertyType::Commercial, 15)
        },
        Property {
            title: "آپارتمان دو خوابه در مرکز تبریز".to_string(),
            description: "نزدیک مترو و مراکز خرید.".to_string(),
            address: "تبریز، خیابان امام".to_string(),
            area: 95.0,
            rooms: 2,
            year_built: 1396,
            estimated_value: 6_200_000_000,
            status: PropertyStatus::PendingDeal,
            ..listing("prop-5", "user-3", "تبریز", PropertyType::Apartment, 12)
        },
        Property {
            title: "باغ ویلا در طبس".to_string(),
            description: "باغ نخل با ساختمان قدیمی.".to_string(),
            address: "طبس، بلوار شهید بهشتی".to_string(),
            area: 1_200.0,
            rooms: 2,
            year_built: 1370,
            estimated_value: 3_000_000_000,
            status: PropertyStatus::Exchanged,
            ..listing("prop-6", "user-4", "طبس", PropertyType::Villa, 10)
        },
        Property {
            title: "زمین مسکونی در شیراز".to_string(),
            description: "زمین با مجوز ساخت چهار طبقه.".to_string(),
            address: "شیراز، معالی آباد".to_string(),
            area: 300.0,
            rooms: 0,
            year_built: 1401,
            estimated_value: 9_000_000_000,
            barter_preferences: vec!["آپارتمان".to_string()],
            ..listing("prop-7", "user-1", "شیراز", PropertyType::Land, 5)
        },
    ]
}

/// Sample proposals between the mock users
pub fn proposals() -> Vec<BarterProposal> {
    let now = Utc::now();
    vec![
        BarterProposal {
            id: ProposalId::from("proposal-1"),
            proposer: UserId::from("user-2"),
            proposer_property: PropertyId::from("prop-2"),
            receiver: UserId::from("user-1"),
            receiver_property: PropertyId::from("prop-1"),
            status: ProposalStatus::Pending,
            message: "ویلای من را با آپارتمان شما معاوضه کنیم؟".to_string(),
            cash_difference: Some(5_000_000_000),
            created_at: now - Duration::days(3),
            decided_at: None,
        },
        BarterProposal {
            id: ProposalId::from("proposal-2"),
            proposer: UserId::from("user-1"),
            proposer_property: PropertyId::from("prop-7"),
            receiver: UserId::from("user-3"),
            receiver_property: PropertyId::from("prop-3"),
            status: ProposalStatus::Rejected,
            message: "زمین شیراز در ازای زمین مشهد.".to_string(),
            cash_difference: Some(-2_000_000_000),
            created_at: now - Duration::days(8),
            decided_at: Some(now - Duration::days(6)),
        },
        BarterProposal {
            id: ProposalId::from("proposal-3"),
            proposer: UserId::from("user-4"),
            proposer_property: PropertyId::from("prop-4"),
            receiver: UserId::from("user-1"),
            receiver_property: PropertyId::from("prop-7"),
            status: ProposalStatus::InReview,
            message: "مغازه بازار به همراه مابه‌التفاوت نقدی.".to_string(),
            cash_difference: Some(8_000_000_000),
            created_at: now - Duration::days(2),
            decided_at: None,
        },
    ]
}
