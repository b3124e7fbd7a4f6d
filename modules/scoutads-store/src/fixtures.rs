//! Built-in fixture data: the creatives the dashboard searches when no
//! creatives file is configured, plus landing-page reference data.

use chrono::{DateTime, Utc};

use scoutads_common::{CountryData, Creative, MediaType, Platform};

struct CreativeSeed {
    id: &'static str,
    fingerprint_text: &'static str,
    fingerprint_media: &'static str,
    first_seen: &'static str,
    last_seen: &'static str,
    media_type: MediaType,
    preview_url: &'static str,
    count_duplicates: u32,
    score: u8,
    countries: &'static [&'static str],
    advertiser: &'static str,
    snippet: &'static str,
    headline: &'static str,
    text: &'static str,
    landing_url: &'static str,
    platform: Platform,
    days_active: u32,
    engagement_proxy: f64,
    velocity: f64,
}

fn timestamp(raw: &str) -> DateTime<Utc> {
    raw.parse().expect("fixture timestamps are valid RFC 3339")
}

fn creative(seed: CreativeSeed) -> Creative {
    Creative {
        creative_id: seed.id.to_string(),
        fingerprint_text: seed.fingerprint_text.to_string(),
        fingerprint_media: seed.fingerprint_media.to_string(),
        first_seen: timestamp(seed.first_seen),
        last_seen: timestamp(seed.last_seen),
        storage_path: None,
        media_type: seed.media_type,
        perceptual_hash: None,
        sha256: None,
        preview_url: seed.preview_url.to_string(),
        count_duplicates: seed.count_duplicates,
        score: seed.score,
        countries: seed.countries.iter().map(|c| c.to_string()).collect(),
        advertiser: seed.advertiser.to_string(),
        snippet: seed.snippet.to_string(),
        headline: Some(seed.headline.to_string()),
        text: seed.text.to_string(),
        landing_url: Some(seed.landing_url.to_string()),
        platform: seed.platform,
        days_active: seed.days_active,
        engagement_proxy: Some(seed.engagement_proxy),
        velocity: Some(seed.velocity),
    }
}

/// The ten fixture creatives, in catalogue order.
pub fn mock_creatives() -> Vec<Creative> {
    vec![
        creative(CreativeSeed {
            id: "1",
            fingerprint_text: "weight-loss-ad-1",
            fingerprint_media: "img-hash-1",
            first_seen: "2024-01-15T10:00:00Z",
            last_seen: "2024-01-22T15:30:00Z",
            media_type: MediaType::Image,
            preview_url: "https://images.unsplash.com/photo-1571019613454-1cb2f99b2d8b?w=400&h=600&fit=crop",
            count_duplicates: 23,
            score: 87,
            countries: &["BR", "US", "MX"],
            advertiser: "FitLife Solutions",
            snippet: "Perca 10kg em 30 dias com nosso método revolucionário...",
            headline: "Transforme seu corpo em 30 dias",
            text: "Perca 10kg em 30 dias com nosso método revolucionário. Sem dietas malucas, sem exercícios extremos. Apenas resultados reais.",
            landing_url: "https://fitlife.com/weight-loss",
            platform: Platform::Facebook,
            days_active: 7,
            engagement_proxy: 1250.0,
            velocity: 3.2,
        }),
        creative(CreativeSeed {
            id: "2",
            fingerprint_text: "crypto-course-ad-1",
            fingerprint_media: "img-hash-2",
            first_seen: "2024-01-10T08:00:00Z",
            last_seen: "2024-01-22T18:45:00Z",
            media_type: MediaType::Video,
            preview_url: "https://images.unsplash.com/photo-1639762681485-074b7f938ba0?w=400&h=600&fit=crop",
            count_duplicates: 45,
            score: 92,
            countries: &["BR", "US", "AR", "CO"],
            advertiser: "Crypto Academy",
            snippet: "Aprenda a ganhar R$ 5.000/mês com criptomoedas...",
            headline: "Do Zero ao Primeiro Bitcoin",
            text: "Aprenda a ganhar R$ 5.000/mês com criptomoedas. Curso completo do básico ao avançado. Mais de 10.000 alunos aprovados.",
            landing_url: "https://cryptoacademy.com/curso",
            platform: Platform::Facebook,
            days_active: 12,
            engagement_proxy: 2890.0,
            velocity: 4.1,
        }),
        creative(CreativeSeed {
            id: "3",
            fingerprint_text: "dropshipping-ad-1",
            fingerprint_media: "img-hash-3",
            first_seen: "2024-01-18T14:20:00Z",
            last_seen: "2024-01-22T20:15:00Z",
            media_type: MediaType::Carousel,
            preview_url: "https://images.unsplash.com/photo-1556742049-0cfed4f6a45d?w=400&h=600&fit=crop",
            count_duplicates: 18,
            score: 76,
            countries: &["BR", "PT"],
            advertiser: "E-commerce Masters",
            snippet: "Monte sua loja online sem estoque e fature R$ 10k/mês...",
            headline: "Dropshipping do Zero",
            text: "Monte sua loja online sem estoque e fature R$ 10k/mês. Método testado e aprovado por mais de 5.000 empreendedores.",
            landing_url: "https://ecommercemaster.com/dropshipping",
            platform: Platform::Instagram,
            days_active: 4,
            engagement_proxy: 890.0,
            velocity: 2.8,
        }),
        creative(CreativeSeed {
            id: "4",
            fingerprint_text: "english-course-ad-1",
            fingerprint_media: "img-hash-4",
            first_seen: "2024-01-05T09:30:00Z",
            last_seen: "2024-01-22T16:20:00Z",
            media_type: MediaType::Image,
            preview_url: "https://images.unsplash.com/photo-1434030216411-0b793f4b4173?w=400&h=600&fit=crop",
            count_duplicates: 67,
            score: 95,
            countries: &["BR", "MX", "AR", "CO", "PE"],
            advertiser: "English Pro",
            snippet: "Fale inglês fluente em 6 meses com apenas 15 min/dia...",
            headline: "Inglês Fluente em 6 Meses",
            text: "Fale inglês fluente em 6 meses com apenas 15 min/dia. Método exclusivo usado por diplomatas e executivos.",
            landing_url: "https://englishpro.com/fluente",
            platform: Platform::Facebook,
            days_active: 17,
            engagement_proxy: 4250.0,
            velocity: 5.2,
        }),
        creative(CreativeSeed {
            id: "5",
            fingerprint_text: "trading-ad-1",
            fingerprint_media: "img-hash-5",
            first_seen: "2024-01-20T11:45:00Z",
            last_seen: "2024-01-22T19:30:00Z",
            media_type: MediaType::Video,
            preview_url: "https://images.unsplash.com/photo-1611974789855-9c2a0a7236a3?w=400&h=600&fit=crop",
            count_duplicates: 31,
            score: 83,
            countries: &["BR", "US"],
            advertiser: "Trade Master",
            snippet: "Ganhe R$ 500/dia operando apenas 2 horas...",
            headline: "Trading Profissional",
            text: "Ganhe R$ 500/dia operando apenas 2 horas. Estratégias profissionais reveladas por trader com 15 anos de experiência.",
            landing_url: "https://trademaster.com/curso",
            platform: Platform::Facebook,
            days_active: 2,
            engagement_proxy: 1560.0,
            velocity: 3.8,
        }),
        creative(CreativeSeed {
            id: "6",
            fingerprint_text: "marketing-ad-1",
            fingerprint_media: "img-hash-6",
            first_seen: "2024-01-12T13:15:00Z",
            last_seen: "2024-01-22T17:45:00Z",
            media_type: MediaType::Image,
            preview_url: "https://images.unsplash.com/photo-1460925895917-afdab827c52f?w=400&h=600&fit=crop",
            count_duplicates: 29,
            score: 79,
            countries: &["BR", "PT", "US"],
            advertiser: "Digital Marketing Pro",
            snippet: "Domine o marketing digital e multiplique seus resultados...",
            headline: "Marketing Digital Avançado",
            text: "Domine o marketing digital e multiplique seus resultados. Curso completo com cases reais e estratégias atualizadas.",
            landing_url: "https://digitalmarketingpro.com/curso",
            platform: Platform::Instagram,
            days_active: 10,
            engagement_proxy: 1890.0,
            velocity: 3.1,
        }),
        creative(CreativeSeed {
            id: "7",
            fingerprint_text: "real-estate-ad-1",
            fingerprint_media: "img-hash-7",
            first_seen: "2024-01-08T16:00:00Z",
            last_seen: "2024-01-22T14:30:00Z",
            media_type: MediaType::Video,
            preview_url: "https://images.unsplash.com/photo-1560518883-ce09059eeffa?w=400&h=600&fit=crop",
            count_duplicates: 52,
            score: 89,
            countries: &["BR", "US", "CA"],
            advertiser: "Real Estate Academy",
            snippet: "Invista em imóveis nos EUA e ganhe em dólar...",
            headline: "Investimento Imobiliário Internacional",
            text: "Invista em imóveis nos EUA e ganhe em dólar. Consultoria especializada para brasileiros investirem no exterior.",
            landing_url: "https://realestate.com/invest",
            platform: Platform::Facebook,
            days_active: 14,
            engagement_proxy: 3120.0,
            velocity: 4.5,
        }),
        creative(CreativeSeed {
            id: "8",
            fingerprint_text: "beauty-ad-1",
            fingerprint_media: "img-hash-8",
            first_seen: "2024-01-16T12:30:00Z",
            last_seen: "2024-01-22T21:15:00Z",
            media_type: MediaType::Carousel,
            preview_url: "https://images.unsplash.com/photo-1596462502278-27bfdc403348?w=400&h=600&fit=crop",
            count_duplicates: 38,
            score: 81,
            countries: &["BR", "AR", "MX"],
            advertiser: "Beauty Secrets",
            snippet: "Rejuvenesça 10 anos com este tratamento revolucionário...",
            headline: "Pele Jovem aos 50",
            text: "Rejuvenesça 10 anos com este tratamento revolucionário. Resultados visíveis em 7 dias, aprovado por dermatologistas.",
            landing_url: "https://beautysecrets.com/treatment",
            platform: Platform::Instagram,
            days_active: 6,
            engagement_proxy: 2340.0,
            velocity: 3.9,
        }),
        creative(CreativeSeed {
            id: "9",
            fingerprint_text: "business-ad-1",
            fingerprint_media: "img-hash-9",
            first_seen: "2024-01-14T09:45:00Z",
            last_seen: "2024-01-22T18:20:00Z",
            media_type: MediaType::Image,
            preview_url: "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=400&h=600&fit=crop",
            count_duplicates: 41,
            score: 85,
            countries: &["BR", "US", "MX", "CO"],
            advertiser: "Business Mentor",
            snippet: "Escale seu negócio para 7 dígitos em 12 meses...",
            headline: "Negócio de 7 Dígitos",
            text: "Escale seu negócio para 7 dígitos em 12 meses. Mentoria exclusiva com empresários que já faturaram milhões.",
            landing_url: "https://businessmentor.com/scale",
            platform: Platform::Facebook,
            days_active: 8,
            engagement_proxy: 2780.0,
            velocity: 4.2,
        }),
        creative(CreativeSeed {
            id: "10",
            fingerprint_text: "health-ad-1",
            fingerprint_media: "img-hash-10",
            first_seen: "2024-01-19T15:20:00Z",
            last_seen: "2024-01-22T16:45:00Z",
            media_type: MediaType::Video,
            preview_url: "https://images.unsplash.com/photo-1559757148-5c350d0d3c56?w=400&h=600&fit=crop",
            count_duplicates: 26,
            score: 78,
            countries: &["BR", "PT"],
            advertiser: "Health Plus",
            snippet: "Elimine a diabetes tipo 2 naturalmente em 30 dias...",
            headline: "Cura Natural da Diabetes",
            text: "Elimine a diabetes tipo 2 naturalmente em 30 dias. Protocolo médico aprovado, sem medicamentos, apenas alimentação.",
            landing_url: "https://healthplus.com/diabetes",
            platform: Platform::Facebook,
            days_active: 3,
            engagement_proxy: 1670.0,
            velocity: 3.5,
        }),
    ]
}

pub fn creative_by_id(id: &str) -> Option<Creative> {
    mock_creatives().into_iter().find(|c| c.creative_id == id)
}

/// Landing-page country statistics.
pub fn mock_countries() -> Vec<CountryData> {
    [
        ("BR", "Brasil", "🇧🇷", 1247, 15.2),
        ("US", "Estados Unidos", "🇺🇸", 892, 8.7),
        ("MX", "México", "🇲🇽", 456, 12.3),
        ("AR", "Argentina", "🇦🇷", 334, 9.8),
        ("CO", "Colômbia", "🇨🇴", 278, 11.5),
        ("PT", "Portugal", "🇵🇹", 189, 7.2),
        ("PE", "Peru", "🇵🇪", 156, 13.1),
        ("CA", "Canadá", "🇨🇦", 134, 6.9),
    ]
    .into_iter()
    .map(|(code, name, flag, ad_count, growth)| CountryData {
        code: code.to_string(),
        name: name.to_string(),
        flag: flag.to_string(),
        ad_count,
        growth_rate: Some(growth),
    })
    .collect()
}

/// Example searches offered as suggestions under an empty search box.
pub fn sample_queries() -> &'static [&'static str] {
    &[
        "curso online",
        "emagrecimento",
        "bitcoin",
        "dropshipping",
        "inglês",
        "trading",
        "marketing digital",
        "investimento",
        "beleza",
        "negócio online",
        "saúde",
        "fitness",
        "educação",
        "tecnologia",
        "vendas",
        "empreendedorismo",
        "consultoria",
        "coaching",
        "imóveis",
        "criptomoedas",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn fixtures_have_unique_ids_and_non_empty_countries() {
        let creatives = mock_creatives();
        assert_eq!(creatives.len(), 10);
        let ids: HashSet<_> = creatives.iter().map(|c| c.creative_id.as_str()).collect();
        assert_eq!(ids.len(), 10);
        assert!(creatives.iter().all(|c| !c.countries.is_empty()));
        assert!(creatives.iter().all(|c| c.score <= 100));
        assert!(creatives.iter().all(|c| c.first_seen <= c.last_seen));
    }

    #[test]
    fn lookup_by_id() {
        let c = creative_by_id("4").unwrap();
        assert_eq!(c.advertiser, "English Pro");
        assert_eq!(c.count_duplicates, 67);
        assert!(creative_by_id("404").is_none());
    }

    #[test]
    fn country_stats_are_ordered_by_ad_count() {
        let countries = mock_countries();
        assert!(countries.windows(2).all(|w| w[0].ad_count >= w[1].ad_count));
    }

    #[test]
    fn sample_queries_are_distinct_and_non_blank() {
        let queries = sample_queries();
        assert_eq!(queries.len(), 20);
        assert!(queries.iter().all(|q| !q.trim().is_empty()));
        let unique: HashSet<_> = queries.iter().collect();
        assert_eq!(unique.len(), queries.len());
    }
}
