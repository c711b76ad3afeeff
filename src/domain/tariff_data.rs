//! Built-in tariff for transfers to and from Santiago airport (SCL).
//!
//! Prices are in CLP, one way, for the whole vehicle.

use crate::domain::model::VehicleKind;

pub const TARIFF_NAME: &str = "SCL 2024";

pub const CURRENCY: &str = "CLP";

/// Flat fee added to every trip that starts at the airport.
pub const AIRPORT_SURCHARGE: u32 = 3000;

/// (kind, passengers, large, medium, small)
pub const VEHICLES: &[(VehicleKind, u32, u32, u32, u32)] = &[
    (VehicleKind::Taxi, 4, 2, 2, 4),
    (VehicleKind::Suv, 6, 4, 3, 6),
];

pub const ZONES: &[(&str, u32)] = &[
    // Poniente
    ("Pudahuel", 20000),
    ("Aeropuerto Hotel Holiday Inn", 12000),
    ("Enea", 15000),
    ("Cerro Navia", 22000),
    ("Lo Prado", 22000),
    ("Quinta Normal", 24000),
    ("Cerrillos", 23000),
    ("Estación Central", 24000),
    ("Maipú", 23000),
    ("Lo Espejo", 26000),
    ("Renca", 24000),
    ("Quilicura", 25000),
    ("Lampa", 30000),
    ("Batuco", 34000),
    ("Noviciado", 24000),
    ("Lomas de Lo Aguirre", 25000),
    // Centro
    ("Santiago Centro", 25000),
    ("Barrio Lastarria", 25000),
    ("Barrio Brasil", 25000),
    ("Barrio Yungay", 25000),
    ("Independencia", 25000),
    ("Recoleta", 26000),
    ("Conchalí", 26000),
    ("Huechuraba", 27000),
    ("Ciudad Empresarial", 27000),
    ("San Miguel", 26000),
    ("San Joaquín", 27000),
    ("Pedro Aguirre Cerda", 26000),
    ("La Cisterna", 27000),
    ("El Bosque", 28000),
    ("San Ramón", 28000),
    ("La Granja", 28000),
    // Oriente
    ("Providencia", 27000),
    ("Ñuñoa", 28000),
    ("Las Condes", 30000),
    ("El Golf", 29000),
    ("Nueva Las Condes", 30000),
    ("Estoril", 31000),
    ("San Carlos de Apoquindo", 33000),
    ("Vitacura", 30000),
    ("Santa María de Manquehue", 31000),
    ("Lo Barnechea", 33000),
    ("La Dehesa", 33000),
    ("Los Trapenses", 34000),
    ("Chicureo", 35000),
    ("Piedra Roja", 35000),
    ("La Reina", 30000),
    ("Peñalolén", 31000),
    ("Macul", 29000),
    ("La Florida", 30000),
    ("Quilín", 29000),
    // Sur
    ("Puente Alto", 33000),
    ("Pirque", 38000),
    ("San José de Maipo", 45000),
    ("La Pintana", 32000),
    ("San Bernardo", 30000),
    ("Nos", 32000),
    ("Buin", 38000),
    ("Paine", 42000),
    ("Calera de Tango", 32000),
    ("Padre Hurtado", 28000),
    ("Peñaflor", 30000),
    ("Talagante", 34000),
    ("El Monte", 38000),
    ("Isla de Maipo", 40000),
    ("Malloco", 31000),
    // Norte
    ("Colina", 33000),
    ("Til Til", 42000),
    ("Valle Grande", 28000),
    ("Ciudad de los Valles", 22000),
    ("Lo Aguirre", 24000),
    // Fuera de Santiago
    ("Curacaví", 40000),
    ("Melipilla", 50000),
    ("Casablanca", 60000),
    ("Valparaíso", 75000),
    ("Viña del Mar", 75000),
    ("Reñaca", 78000),
    ("Concón", 80000),
    ("Quintero", 90000),
    ("Algarrobo", 80000),
    ("San Antonio", 80000),
    ("Cartagena", 82000),
    ("Los Andes", 80000),
    ("San Felipe", 85000),
    ("Portillo", 120000),
    ("Farellones", 80000),
    ("Valle Nevado", 90000),
    ("La Parva", 85000),
    ("Rancagua", 75000),
    ("Machalí", 80000),
];
