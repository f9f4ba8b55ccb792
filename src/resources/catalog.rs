//! Resource registry
//!
//! The flat schema is canonical: partnerships and locations hang off
//! `proyectos.sociedad_id` / `proyectos.ubicacion`, legal status lives on
//! `sociedades`, leases reference `contratos.propiedad_id` directly.

use crate::query::Comparison;

use super::{Column, FieldKind, FilterField, Mode, Resource};

const fn col(expr: &'static str, name: &'static str) -> Column {
    Column { expr, name }
}

const fn eq(
    param: &'static str,
    column: &'static str,
    kind: FieldKind,
    help: &'static str,
) -> FilterField {
    FilterField {
        param,
        column,
        kind,
        comparison: Comparison::Eq,
        help,
    }
}

const LEASE_ACTIVE: &str = "contratos.fecha_inicio <= CURRENT_DATE AND \
     (contratos.fecha_fin_forzosa IS NULL OR contratos.fecha_fin_forzosa > CURRENT_DATE)";

const LEASE_NOT_EXPIRED: &str =
    "contratos.fecha_fin_forzosa > CURRENT_DATE OR contratos.fecha_fin_forzosa IS NULL";

static RESOURCES: &[Resource] = &[
    Resource {
        name: "propiedades",
        description: "Propiedades de la base de datos",
        source: "propiedades",
        columns: &[
            col("propiedades.id", "id"),
            col("propiedades.proyecto_id", "proyecto_id"),
            col("propiedades.nombre", "nombre"),
            col("propiedades.propietario", "propietario"),
            col("propiedades.clave_catastral", "clave_catastral"),
            col("propiedades.localizacion", "localizacion"),
            col("propiedades.superficie_total_m2", "superficie_total_m2"),
            col("propiedades.base_predial", "base_predial"),
            col("propiedades.adeudo_predial", "adeudo_predial"),
            col("propiedades.valor_comercial", "valor_comercial"),
            col("propiedades.valor_comercial_usd", "valor_comercial_usd"),
            col("propiedades.anio_valor_comercial", "anio_valor_comercial"),
            col("propiedades.participacion_porcentaje", "participacion_porcentaje"),
            col("propiedades.anios_pend_predial", "anios_pend_predial"),
            col("propiedades.comentarios", "comentarios"),
            col("propiedades.fecha_registro", "fecha_registro"),
        ],
        filters: &[
            eq(
                "clave_catastral",
                "propiedades.clave_catastral",
                FieldKind::Text,
                "Opcional: Clave catastral de la propiedad",
            ),
            eq(
                "proyecto_id",
                "propiedades.proyecto_id",
                FieldKind::Integer,
                "Opcional: ID del proyecto",
            ),
            // Properties owing more than the given amount.
            FilterField {
                param: "adeudo_predial",
                column: "propiedades.adeudo_predial",
                kind: FieldKind::Integer,
                comparison: Comparison::Gt,
                help: "Opcional: Propiedades con adeudo predial mayor a X",
            },
        ],
        modes: &[Mode::Aggregate {
            flag: "total_m2",
            expr: "SUM(propiedades.superficie_total_m2)",
            column: "total_superficie_m2",
            condition: None,
            help: "Opcional: Superficie total de todas las propiedades",
        }],
    },
    Resource {
        name: "proyectos",
        description: "Proyectos de la base de datos",
        source: "proyectos",
        columns: &[
            col("proyectos.id", "id"),
            col("proyectos.nombre", "nombre"),
            col("proyectos.propietario", "propietario"),
            col("proyectos.ubicacion", "ubicacion"),
            col("proyectos.sociedad_id", "sociedad_id"),
        ],
        filters: &[
            eq("nombre", "proyectos.nombre", FieldKind::Text, "Opcional: Nombre del proyecto"),
            eq(
                "sociedad_id",
                "proyectos.sociedad_id",
                FieldKind::Integer,
                "Opcional: ID de la sociedad",
            ),
        ],
        modes: &[],
    },
    Resource {
        name: "sociedades",
        description: "Sociedades de la base de datos",
        source: "sociedades",
        columns: &[
            col("sociedades.id_sociedad", "id_sociedad"),
            col("sociedades.nombre", "nombre"),
            col("sociedades.ubicacion", "ubicacion"),
            col("sociedades.propietario", "propietario"),
            col("sociedades.sociedad", "sociedad"),
            col("sociedades.estatus_legal", "estatus_legal"),
            col("sociedades.superficie_m2", "superficie_m2"),
            col("sociedades.suma_superficie", "suma_superficie"),
            col("sociedades.participacion", "participacion"),
            col("sociedades.comentarios", "comentarios"),
        ],
        filters: &[
            eq("nombre", "sociedades.nombre", FieldKind::Text, "Opcional: Nombre de la sociedad"),
            eq(
                "participacion",
                "sociedades.participacion",
                FieldKind::Float,
                "Opcional: Participación de la sociedad",
            ),
        ],
        modes: &[Mode::Aggregate {
            flag: "total_superficie",
            expr: "SUM(sociedades.superficie_m2)",
            column: "total_superficie_m2",
            condition: None,
            help: "Opcional: Superficie total de todas las sociedades",
        }],
    },
    Resource {
        name: "estatus_legal",
        description: "Estatus legal de cada sociedad",
        source: "sociedades",
        columns: &[
            col("sociedades.id_sociedad", "id_sociedad"),
            col("sociedades.sociedad", "sociedad"),
            col("sociedades.estatus_legal", "estatus_legal"),
        ],
        filters: &[eq(
            "estatus_legal",
            "sociedades.estatus_legal",
            FieldKind::Text,
            "Opcional: Estatus legal de la sociedad",
        )],
        modes: &[],
    },
    Resource {
        name: "ubicaciones",
        description: "Ubicacion de cada proyecto",
        source: "proyectos",
        columns: &[
            col("proyectos.id", "proyecto_id"),
            col("proyectos.nombre", "proyecto_nombre"),
            col("proyectos.ubicacion", "ubicacion"),
        ],
        filters: &[eq(
            "ubicacion",
            "proyectos.ubicacion",
            FieldKind::Text,
            "Opcional: Ubicación del proyecto",
        )],
        modes: &[],
    },
    Resource {
        name: "contratos",
        description: "Contratos de la base de datos",
        source: "contratos",
        columns: &[
            col("contratos.id", "id"),
            col("contratos.propiedad_id", "propiedad_id"),
            col("contratos.inquilino_nombre", "inquilino_nombre"),
            col("contratos.fecha_inicio", "fecha_inicio"),
            col("contratos.fecha_fin_forzosa", "fecha_fin_forzosa"),
            col("contratos.fecha_fin_no_forzosa", "fecha_fin_no_forzosa"),
            col("contratos.duracion::text", "duracion"),
            col("contratos.renta_mensual", "renta_mensual"),
            col("contratos.politica_incrementos", "politica_incrementos"),
            col("contratos.tiempo_restante", "tiempo_restante"),
        ],
        filters: &[eq(
            "propiedad_id",
            "contratos.propiedad_id",
            FieldKind::Integer,
            "Opcional: ID de la propiedad",
        )],
        modes: &[
            Mode::Aggregate {
                flag: "renta_total",
                expr: "SUM(contratos.renta_mensual)",
                column: "total_renta_mensual",
                condition: Some(LEASE_NOT_EXPIRED),
                help: "Opcional: Renta total de todos los contratos",
            },
            Mode::Restrict {
                flag: "contratos_vigentes",
                condition: LEASE_ACTIVE,
                help: "Opcional: Contratos vigentes",
            },
        ],
    },
    Resource {
        name: "finanzas",
        description: "Finanzas de la base de datos",
        source: "financieros",
        columns: &[
            col("financieros.id", "id"),
            col("financieros.propiedad_id", "propiedad_id"),
            col("financieros.renta_mensual", "renta_mensual"),
            col("financieros.politica_incrementos", "politica_incrementos"),
            col("financieros.renta_total", "renta_total"),
        ],
        filters: &[eq(
            "propiedad_id",
            "financieros.propiedad_id",
            FieldKind::Integer,
            "Opcional: ID de la propiedad",
        )],
        modes: &[Mode::Aggregate {
            flag: "renta_total",
            expr: "SUM(financieros.renta_total)",
            column: "total_renta_total",
            condition: None,
            help: "Opcional: Renta total de todas las propiedades",
        }],
    },
    Resource {
        name: "incidencias",
        description: "Incidencias de la base de datos",
        source: "incidencias",
        columns: &[
            col("incidencias.id", "id"),
            col("incidencias.propiedad_id", "propiedad_id"),
            col("incidencias.contrato_id", "contrato_id"),
            col("incidencias.descripcion", "descripcion"),
            col("incidencias.fecha_creacion", "fecha_creacion"),
        ],
        filters: &[
            eq(
                "propiedad_id",
                "incidencias.propiedad_id",
                FieldKind::Integer,
                "Opcional: ID de la propiedad",
            ),
            eq(
                "contrato_id",
                "incidencias.contrato_id",
                FieldKind::Integer,
                "Opcional: ID del contrato",
            ),
        ],
        modes: &[],
    },
    Resource {
        name: "bilbao_comercial",
        description: "Bilbao Comercial de la base de datos",
        source: "bilbao_comercial b JOIN propiedades p ON b.propiedad_id = p.id",
        columns: &[
            col("p.nombre", "propiedad_nombre"),
            col("b.nombre_comercial", "nombre_comercial"),
            col("b.predial_participacion", "predial_participacion"),
        ],
        filters: &[],
        modes: &[],
    },
    Resource {
        name: "andenes",
        description: "Andenes de la base de datos",
        source: "andenes a JOIN propiedades p ON a.propiedad_id = p.id",
        columns: &[
            col("p.nombre", "propiedad_nombre"),
            col("a.numero_andenes", "numero_andenes"),
            col("a.clave_andenes", "clave_andenes"),
            col("a.nombre_andenes", "nombre_andenes"),
            col("a.vocacion", "vocacion"),
            col("a.responsable", "responsable"),
            col("a.categoria", "categoria"),
            col("a.asesor", "asesor"),
            col("a.rango_precio", "rango_precio"),
        ],
        filters: &[],
        modes: &[],
    },
    Resource {
        name: "pto_peniasco",
        description: "Pto Peñasco de la base de datos",
        source: "pto_peniasco pp JOIN propiedades p ON pp.propiedad_id = p.id",
        columns: &[
            col("p.nombre", "propiedad_nombre"),
            col("pp.terreno", "terreno"),
            col("pp.base_predial", "base_predial"),
            col("pp.adeudo_predial", "adeudo_predial"),
            col("pp.participacion_porcentaje", "participacion_porcentaje"),
        ],
        filters: &[],
        modes: &[],
    },
    Resource {
        name: "twwg_las_palomas",
        description: "TWWG Las Palomas de la base de datos",
        source: "twwg_las_palomas t JOIN propiedades p ON t.propiedad_id = p.id",
        columns: &[
            col("p.nombre", "propiedad_nombre"),
            col("t.nombre", "nombre"),
            col("t.participacion_porcentaje", "participacion_porcentaje"),
            col("t.comentarios", "comentarios"),
        ],
        filters: &[],
        modes: &[],
    },
    Resource {
        name: "slrc_1",
        description: "SLRC 1 de la base de datos",
        source: "slrc_1 s JOIN propiedades p ON s.propiedad_id = p.id",
        columns: &[
            col("p.nombre", "propiedad_nombre"),
            col("s.nombre_terreno", "nombre_terreno"),
            col("s.numero_fraccion", "numero_fraccion"),
            col("s.base_predial", "base_predial"),
            col("s.adeudo_predial", "adeudo_predial"),
            col("s.anios_pend_predial", "anios_pend_predial"),
            col("s.comentarios", "comentarios"),
        ],
        filters: &[],
        modes: &[],
    },
];

/// Every served resource, in route registration order
pub fn registry() -> &'static [Resource] {
    RESOURCES
}

/// Look up a resource by route segment
pub fn find(name: &str) -> Option<&'static Resource> {
    RESOURCES.iter().find(|r| r.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = registry().iter().map(|r| r.name).collect();
        assert_eq!(names.len(), registry().len());
    }

    #[test]
    fn test_output_names_are_unique_per_resource() {
        for resource in registry() {
            let names: HashSet<_> = resource.columns.iter().map(|c| c.name).collect();
            assert_eq!(names.len(), resource.columns.len(), "{}", resource.name);
        }
    }

    #[test]
    fn test_filter_params_do_not_shadow_pagination_or_flags() {
        for resource in registry() {
            for field in resource.filters {
                assert_ne!(field.param, "page");
                assert_ne!(field.param, "page_size");
                assert!(resource.modes.iter().all(|m| m.flag() != field.param));
            }
        }
    }

    #[test]
    fn test_every_parameter_is_documented() {
        for resource in registry() {
            assert!(!resource.description.is_empty(), "{}", resource.name);
            for field in resource.filters {
                assert!(field.help.starts_with("Opcional: "), "{}", field.param);
            }
            for mode in resource.modes {
                assert!(mode.help().starts_with("Opcional: "), "{}", mode.flag());
            }
        }
    }

    #[test]
    fn test_find() {
        assert_eq!(find("slrc_1").map(|r| r.columns.len()), Some(7));
        assert!(find("usuarios").is_none());
    }
}
