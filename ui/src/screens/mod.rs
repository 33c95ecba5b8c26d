pub mod geolocate;
