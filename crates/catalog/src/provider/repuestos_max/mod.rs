//! RepuestosMax adapter.
//!
//! # Endpoints
//!
//! - Catalog: `GET {base}/api/repuestosmax/catalogo?pagina=&limite=`
//! - Single part: `GET {base}/api/repuestosmax/productos?codigo=`
//!
//! The catalog endpoint wraps items as `{ exito, productos: [],
//! paginacion: {} }` or answers with a bare array; the single-part
//! endpoint nests its match under `resultado.productos[0]` with a
//! flat `productos` fallback. Payload fields are Spanish and exist in
//! both a nested (`informacionBasica`, `inventario`, `multimedia`) and a
//! flat legacy form; the raw structs mirror the wire vocabulary.

use async_trait::async_trait;
use chrono::Utc;
use log::warn;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::CatalogError;
use crate::models::{Part, PartSource, ProviderOffer};
use crate::provider::{build_client, first_filled, get_json, PartsProvider, RawNumber};

const SOURCE: PartSource = PartSource::RepuestosMax;

/// A raw RepuestosMax product, nested and flat field variants combined.
#[derive(Debug, Deserialize)]
struct RawProducto {
    identificacion: Option<Identificacion>,
    sku: Option<String>,
    codigo: Option<String>,
    #[serde(rename = "informacionBasica")]
    informacion_basica: Option<InformacionBasica>,
    nombre: Option<String>,
    descripcion: Option<String>,
    precio: Option<Precio>,
    inventario: Option<Inventario>,
    stock: Option<RawNumber>,
    marca: Option<String>,
    categoria: Option<String>,
    multimedia: Option<Multimedia>,
    imagen: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Identificacion {
    sku: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InformacionBasica {
    nombre: Option<String>,
    descripcion: Option<String>,
    marca: Option<Nombrado>,
    categoria: Option<Nombrado>,
}

#[derive(Debug, Deserialize)]
struct Nombrado {
    nombre: Option<String>,
}

/// `precio` arrives either as `{ valor }` or as a bare number/string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Precio {
    Estructurado { valor: Option<RawNumber> },
    Plano(RawNumber),
}

impl Precio {
    fn valor(&self) -> Decimal {
        match self {
            Precio::Estructurado { valor } => {
                valor.as_ref().map(RawNumber::as_price).unwrap_or_default()
            }
            Precio::Plano(value) => value.as_price(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Inventario {
    cantidad: Option<RawNumber>,
}

#[derive(Debug, Deserialize)]
struct Multimedia {
    #[serde(default)]
    imagenes: Vec<Imagen>,
}

#[derive(Debug, Deserialize)]
struct Imagen {
    url: Option<String>,
}

/// Catalog answer: a bare array or the `{ exito, productos, paginacion }`
/// wrapper where every field may be missing.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogResponse {
    Bare(Vec<RawProducto>),
    Wrapped(CatalogEnvelope),
}

#[derive(Debug, Deserialize)]
struct CatalogEnvelope {
    #[serde(default)]
    productos: Vec<RawProducto>,
}

impl CatalogResponse {
    fn into_items(self) -> Vec<RawProducto> {
        match self {
            CatalogResponse::Bare(items) => items,
            CatalogResponse::Wrapped(envelope) => envelope.productos,
        }
    }
}

/// Single-part answer: `{ exito, resultado: { productos }, productos }`.
#[derive(Debug, Deserialize)]
struct PartEnvelope {
    resultado: Option<Resultado>,
    #[serde(default)]
    productos: Vec<RawProducto>,
}

#[derive(Debug, Deserialize)]
struct Resultado {
    #[serde(default)]
    productos: Vec<RawProducto>,
}

impl PartEnvelope {
    fn into_first(self) -> Option<RawProducto> {
        let PartEnvelope {
            resultado,
            productos,
        } = self;
        resultado
            .map(|inner| inner.productos)
            .unwrap_or_default()
            .into_iter()
            .next()
            .or_else(|| productos.into_iter().next())
    }
}

/// Map one raw product into a canonical part carrying this provider's
/// offer. Items without a usable SKU are dropped.
fn normalize(raw: RawProducto) -> Option<Part> {
    let sku = first_filled([
        raw.identificacion
            .as_ref()
            .and_then(|id| id.sku.as_deref()),
        raw.sku.as_deref(),
        raw.codigo.as_deref(),
    ])?;

    let basica = raw.informacion_basica.as_ref();
    let price = raw.precio.as_ref().map(Precio::valor).unwrap_or_default();
    let stock = raw
        .inventario
        .as_ref()
        .and_then(|inv| inv.cantidad.as_ref())
        .or(raw.stock.as_ref())
        .map(RawNumber::as_quantity)
        .unwrap_or(0);

    Some(Part {
        name: first_filled([
            basica.and_then(|b| b.nombre.as_deref()),
            raw.nombre.as_deref(),
        ])
        .unwrap_or_default(),
        description: first_filled([
            basica.and_then(|b| b.descripcion.as_deref()),
            raw.descripcion.as_deref(),
        ]),
        price,
        stock,
        brand: first_filled([
            basica
                .and_then(|b| b.marca.as_ref())
                .and_then(|m| m.nombre.as_deref()),
            raw.marca.as_deref(),
        ]),
        model: None,
        year: None,
        image: first_filled([
            raw.multimedia
                .as_ref()
                .and_then(|m| m.imagenes.first())
                .and_then(|img| img.url.as_deref()),
            raw.imagen.as_deref(),
        ]),
        category: first_filled([
            basica
                .and_then(|b| b.categoria.as_ref())
                .and_then(|c| c.nombre.as_deref()),
            raw.categoria.as_deref(),
        ]),
        offers: vec![ProviderOffer {
            source: SOURCE,
            price,
            stock,
            provider_sku: Some(sku.clone()),
            last_updated: Utc::now(),
        }],
        sku,
    })
}

/// Adapter for the RepuestosMax API.
pub struct RepuestosMaxProvider {
    client: Client,
    base_url: String,
}

impl RepuestosMaxProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: build_client(),
            base_url: base_url.into(),
        }
    }

    async fn catalog(&self, pagina: u32, limite: u32) -> Result<Vec<Part>, CatalogError> {
        let url = format!(
            "{}/api/repuestosmax/catalogo?pagina={}&limite={}",
            self.base_url, pagina, limite
        );
        let response: CatalogResponse = get_json(&self.client, SOURCE, &url).await?;
        Ok(response
            .into_items()
            .into_iter()
            .filter_map(normalize)
            .collect())
    }

    async fn part(&self, codigo: &str) -> Result<Option<Part>, CatalogError> {
        let url = format!(
            "{}/api/repuestosmax/productos?codigo={}",
            self.base_url,
            urlencoding::encode(codigo)
        );
        let response: PartEnvelope = get_json(&self.client, SOURCE, &url).await?;
        Ok(response.into_first().and_then(normalize))
    }
}

#[async_trait]
impl PartsProvider for RepuestosMaxProvider {
    fn id(&self) -> PartSource {
        SOURCE
    }

    async fn fetch_catalog_page(&self, page: u32, limit: u32) -> Vec<Part> {
        match self.catalog(page, limit).await {
            Ok(parts) => parts,
            Err(err) => {
                warn!("RepuestosMax catalog fetch failed: {}", err);
                Vec::new()
            }
        }
    }

    async fn fetch_part(&self, sku: &str) -> Option<Part> {
        match self.part(sku).await {
            Ok(part) => part,
            Err(err) => {
                warn!("RepuestosMax part {} fetch failed: {}", sku, err);
                None
            }
        }
    }
}
